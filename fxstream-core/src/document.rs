use serde_json::{Map, Value};

use crate::error::DocumentError;

/// Разобранная запись: всегда JSON-объект верхнего уровня.
///
/// Не держит ссылок на буфер фреймера.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

/// Парсит одну запись. Всё, кроме объекта на верхнем уровне, - ошибка.
pub fn parse(record: &[u8]) -> Result<Document, DocumentError> {
    match serde_json::from_slice::<Value>(record)? {
        Value::Object(root) => Ok(Document { root }),
        other => Err(DocumentError::NotAnObject {
            kind: kind_of(&other),
        }),
    }
}

impl Document {
    /// Значение по ключу, если есть
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Вложенный объект по ключу. `None`, если ключа нет или это не объект.
    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.root.get(key).and_then(Value::as_object)
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
