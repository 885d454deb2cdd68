use std::fmt::Display;

use chrono::TimeZone;

use crate::clock::CalendarClock;
use crate::error::TickError;
use crate::types::{DisplayLine, Instrument, QuoteEvent};

/// Собирает строку вывода из тика: время в зоне часов, спред в пипсах
/// выбранного инструмента.
#[derive(Debug, Clone)]
pub struct QuoteFormatter<Tz: TimeZone> {
    clock: CalendarClock<Tz>,
    instrument: Instrument,
}

impl<Tz> QuoteFormatter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Форматтер для часов и инструмента сессии
    pub fn new(clock: CalendarClock<Tz>, instrument: Instrument) -> Self {
        Self { clock, instrument }
    }

    /// Инструмент, по которому считается спред
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Тик -> строка вывода. Ошибка, если метка времени не разбирается.
    pub fn format(&self, quote: &QuoteEvent) -> Result<DisplayLine, TickError> {
        Ok(DisplayLine {
            timestamp: self.clock.convert(&quote.time)?,
            bid: quote.bid,
            ask: quote.ask,
            spread: self.instrument.spread(quote.bid, quote.ask),
        })
    }
}
