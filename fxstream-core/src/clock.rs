//! Перевод вендорской метки времени в календарное время.
//!
//! Вендор шлёт строку цифр: первые 10 - Unix-секунды, дальше дробная часть
//! (обычно 7 цифр). Дробную часть отбрасываем.

use std::fmt::Display;

use chrono::{Local, TimeZone};

use crate::constants::EPOCH_SECONDS_DIGITS;
use crate::error::TimeError;

const DISPLAY_FORMAT: &str = "[%Y-%m-%d %H:%M:%S]";

/// Часы с зафиксированной зоной. Создаются один раз на процесс.
#[derive(Debug, Clone)]
pub struct CalendarClock<Tz: TimeZone> {
    tz: Tz,
}

impl CalendarClock<Local> {
    /// Локальная зона процесса.
    ///
    /// `chrono::Local` не снимок: смещение берётся из `TZ` и `/etc/localtime`
    /// на каждую конвертацию, и chrono может перечитать их, если они поменялись
    /// посреди сессии. Для зоны, неизменной на весь запуск, есть `--utc`
    /// или [`CalendarClock::new`] с `Utc`/`FixedOffset`.
    pub fn local() -> Self {
        Self { tz: Local }
    }
}

impl<Tz> CalendarClock<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Часы в произвольной зоне (`Utc`, `FixedOffset`, ...)
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// `"14200704001234567"` -> `"[2015-01-01 00:00:00]"` (для UTC)
    pub fn convert(&self, raw: &str) -> Result<String, TimeError> {
        let secs = epoch_seconds(raw)?;
        let dt = i64::try_from(secs)
            .ok()
            .and_then(|s| self.tz.timestamp_opt(s, 0).single())
            .ok_or(TimeError::OutOfRange { secs })?;
        Ok(dt.format(DISPLAY_FORMAT).to_string())
    }
}

/// Первые 10 символов как Unix-секунды. Все 10 обязаны быть цифрами.
pub fn epoch_seconds(raw: &str) -> Result<u64, TimeError> {
    let digits = raw
        .as_bytes()
        .get(..EPOCH_SECONDS_DIGITS)
        .filter(|d| d.iter().all(u8::is_ascii_digit))
        .ok_or_else(|| TimeError::TooShort {
            raw: raw.to_string(),
        })?;

    Ok(digits
        .iter()
        .fold(0u64, |acc, d| acc * 10 + u64::from(d - b'0')))
}
