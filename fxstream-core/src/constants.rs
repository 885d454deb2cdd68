/// Разделитель записей в потоке вендора
pub const RECORD_DELIMITER: &[u8; 2] = b"\r\n";

/// Сколько первых цифр метки времени - это Unix-секунды
pub const EPOCH_SECONDS_DIGITS: usize = 10;

/// Инструмент по умолчанию
pub const DEFAULT_INSTRUMENT: &str = "USD_JPY";

/// Стрим демо-счёта
pub const PRACTICE_STREAM_URL: &str = "https://stream-fxpractice.oanda.com/v1/prices";
/// Стрим реального счёта
pub const LIVE_STREAM_URL: &str = "https://stream-fxtrade.oanda.com/v1/prices";

/// Заголовок, переключающий формат времени на UNIX
pub const DATETIME_FORMAT_HEADER: &str = "X-Accept-Datetime-Format";
/// Значение для [`DATETIME_FORMAT_HEADER`]
pub const DATETIME_FORMAT_UNIX: &str = "UNIX";
