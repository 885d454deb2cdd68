use thiserror::Error;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum CoreError {
    /// Запись не является JSON-объектом
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Тик пришёл битым
    #[error(transparent)]
    Tick(#[from] TickError),
}

/// Ошибки разбора записи
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Невалидный JSON
    #[error("invalid json: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Верхний уровень - не объект
    #[error("top-level value is {kind}, expected object")]
    NotAnObject {
        /// что пришло вместо объекта
        kind: &'static str,
    },
}

/// Ошибки тика
#[derive(Debug, Error)]
pub enum TickError {
    /// Нет `time`/`bid`/`ask` или у них не тот тип
    #[error("bad tick payload: {0}")]
    Payload(#[source] serde_json::Error),

    /// Метка времени не разбирается
    #[error(transparent)]
    Time(#[from] TimeError),
}

/// Ошибки конвертации метки времени
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    /// Меньше 10 цифр в начале строки
    #[error("timestamp {raw:?} has fewer than 10 leading digits")]
    TooShort {
        /// исходная строка
        raw: String,
    },

    /// Секунды не помещаются в календарь
    #[error("epoch seconds out of range: {secs}")]
    OutOfRange {
        /// разобранные секунды
        secs: u64,
    },
}
