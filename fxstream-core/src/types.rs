use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_INSTRUMENT;

/// Тик из стрима. Живёт ровно до форматирования.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteEvent {
    /// Сырая метка: 10 цифр Unix-секунд + дробная часть
    pub time: String,
    /// цена продажи
    pub bid: f64,
    /// цена покупки
    pub ask: f64,
    /// Вендор кладёт символ в тик, но он не обязателен.
    /// Не строка (число, объект, `null`) - считаем, что символа нет.
    #[serde(default, deserialize_with = "lenient_symbol")]
    pub instrument: Option<String>,
}

fn lenient_symbol<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        _ => None,
    }))
}

/// Содержимое `disconnect`. Нужно только для логов, поэтому всё опционально
/// и поля неверного типа просто игнорируются.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisconnectNotice {
    /// код причины
    pub code: Option<i64>,
    /// текст причины
    pub message: Option<String>,
    /// ссылка на описание (`moreInfo`)
    pub more_info: Option<String>,
}

impl DisconnectNotice {
    pub(crate) fn from_object(obj: &Map<String, Value>) -> Self {
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            code: obj.get("code").and_then(Value::as_i64),
            message: text("message"),
            more_info: text("moreInfo"),
        }
    }
}

impl fmt::Display for DisconnectNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "code={code}")?,
            None => write!(f, "code=?")?,
        }
        if let Some(msg) = &self.message {
            write!(f, " message={msg:?}")?;
        }
        if let Some(info) = &self.more_info {
            write!(f, " more_info={info}")?;
        }
        Ok(())
    }
}

/// Инструмент и его множитель для спреда в пипсах.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    symbol: String,
    pip_scale: f64,
}

impl Instrument {
    /// Множитель по умолчанию: пары к JPY котируются с 2-3 знаками (x100),
    /// остальные с 4-5 (x10000).
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        let pip_scale = if symbol.to_ascii_uppercase().ends_with("_JPY") {
            100.0
        } else {
            10_000.0
        };
        Self { symbol, pip_scale }
    }

    /// Явно задать множитель спреда
    pub fn with_pip_scale(mut self, pip_scale: f64) -> Self {
        self.pip_scale = pip_scale;
        self
    }

    /// Символ вида `USD_JPY`
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Множитель спреда
    pub fn pip_scale(&self) -> f64 {
        self.pip_scale
    }

    /// (ask - bid) в пипсах
    pub fn spread(&self, bid: f64, ask: f64) -> f64 {
        (ask - bid) * self.pip_scale
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUMENT)
    }
}

/// Готовая к выводу строка котировки.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLine {
    /// `[YYYY-MM-DD HH:MM:SS]` в выбранной зоне
    pub timestamp: String,
    /// bid, печатается с 3 знаками
    pub bid: f64,
    /// ask, печатается с 3 знаками
    pub ask: f64,
    /// спред в пипсах, печатается с 1 знаком
    pub spread: f64,
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bid: {:.3} ask: {:.3} sp: {:.1}",
            self.timestamp, self.bid, self.ask, self.spread
        )
    }
}
