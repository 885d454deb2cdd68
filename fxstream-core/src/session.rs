//! Контроллер одной стрим-сессии.
//!
//! Транспорт отдаёт чанки через [`StreamController::on_chunk`] и в конце
//! сообщает HTTP-статус через [`StreamController::finish`]. Всё состояние
//! (буфер фреймера, счётчики) принадлежит экземпляру контроллера, так что
//! несколько сессий друг другу не мешают.

use std::fmt::{self, Display};

use chrono::TimeZone;
use log::{debug, error, info, warn};

use crate::classify::{Message, decode};
use crate::error::CoreError;
use crate::format::QuoteFormatter;
use crate::framer::{Record, RecordFramer};
use crate::sink::TickSink;

/// Итог обработки чанка / сессии
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// продолжаем, нужны ещё чанки
    Continue,
    /// соединение закрылось со статусом 2xx
    Normal,
    /// пришёл `disconnect`
    DisconnectReceived,
    /// запись не разобралась или тик битый
    MalformedInput(String),
    /// транспорт вернул не-2xx
    TransportError(u16),
    /// остановлено оператором
    Cancelled,
    /// вывод закрыт
    OutputFailed,
}

impl SessionOutcome {
    /// Всё, кроме `Continue`, - конец сессии
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionOutcome::Continue)
    }

    /// Конец сессии по ошибке
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SessionOutcome::MalformedInput(_)
                | SessionOutcome::TransportError(_)
                | SessionOutcome::OutputFailed
        )
    }
}

impl Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::Continue => write!(f, "streaming"),
            SessionOutcome::Normal => write!(f, "connection closed"),
            SessionOutcome::DisconnectReceived => write!(f, "disconnect received"),
            SessionOutcome::MalformedInput(why) => write!(f, "malformed input: {why}"),
            SessionOutcome::TransportError(code) => write!(f, "HTTP code error {code}"),
            SessionOutcome::Cancelled => write!(f, "cancelled"),
            SessionOutcome::OutputFailed => write!(f, "output closed"),
        }
    }
}

/// Состояние контроллера
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// ждём чанки
    Streaming,
    /// сессия закончена, чанки больше не принимаются
    Stopped(SessionOutcome),
}

/// Счётчики сессии
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// непустые записи
    pub records: u64,
    /// выведенные котировки
    pub ticks: u64,
    /// keep-alive и незнакомые сообщения
    pub heartbeats: u64,
}

/// Фреймер + разбор + вывод для одной сессии
pub struct StreamController<Tz: TimeZone, S> {
    framer: RecordFramer,
    formatter: QuoteFormatter<Tz>,
    sink: S,
    state: SessionState,
    stats: SessionStats,
}

impl<Tz, S> StreamController<Tz, S>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    S: TickSink,
{
    /// Новая сессия в состоянии `Streaming`
    pub fn new(formatter: QuoteFormatter<Tz>, sink: S) -> Self {
        Self {
            framer: RecordFramer::new(),
            formatter,
            sink,
            state: SessionState::Streaming,
            stats: SessionStats::default(),
        }
    }

    /// Текущее состояние
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Счётчики на текущий момент
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Куда пишутся котировки
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Обрабатывает очередной чанк. После остановки чанки не принимаются:
    /// сразу возвращается итог сессии.
    pub fn on_chunk(&mut self, chunk: &[u8]) -> SessionOutcome {
        if let SessionState::Stopped(outcome) = &self.state {
            return outcome.clone();
        }

        let Self {
            framer,
            formatter,
            sink,
            stats,
            ..
        } = self;

        let mut stop = None;
        for record in framer.feed(chunk) {
            stop = handle_record(record, formatter, sink, stats);
            if stop.is_some() {
                // хвост буфера после остановки не разбираем
                break;
            }
        }

        match stop {
            Some(outcome) => self.stop(outcome),
            None => SessionOutcome::Continue,
        }
    }

    /// Транспорт закрыл соединение со статусом `status`.
    pub fn finish(&mut self, status: u16) -> SessionOutcome {
        if let SessionState::Stopped(outcome) = &self.state {
            return outcome.clone();
        }

        if (200..300).contains(&status) {
            let pending = self.framer.pending();
            if pending > 0 {
                debug!("dropping {pending} bytes of unterminated record");
            }
            self.stop(SessionOutcome::Normal)
        } else {
            error!("HTTP code error {status}");
            self.stop(SessionOutcome::TransportError(status))
        }
    }

    /// Остановка снаружи (Ctrl+C)
    pub fn cancel(&mut self) -> SessionOutcome {
        if let SessionState::Stopped(outcome) = &self.state {
            return outcome.clone();
        }
        self.stop(SessionOutcome::Cancelled)
    }

    fn stop(&mut self, outcome: SessionOutcome) -> SessionOutcome {
        let SessionStats {
            records,
            ticks,
            heartbeats,
        } = self.stats;
        info!(
            "session stopped ({outcome}): records={records}, ticks={ticks}, heartbeats={heartbeats}"
        );
        self.state = SessionState::Stopped(outcome.clone());
        outcome
    }
}

fn handle_record<Tz, S>(
    record: Record,
    formatter: &QuoteFormatter<Tz>,
    sink: &mut S,
    stats: &mut SessionStats,
) -> Option<SessionOutcome>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    S: TickSink,
{
    stats.records += 1;

    let quote = match decode(&record) {
        Ok(Message::Tick(quote)) => quote,
        Ok(Message::Heartbeat) => {
            stats.heartbeats += 1;
            return None;
        }
        Ok(Message::Disconnect(notice)) => {
            warn!("disconnect message: {notice}");
            return Some(SessionOutcome::DisconnectReceived);
        }
        Err(e @ CoreError::Document(_)) => {
            warn!(
                "[JSON] {e}; record: {}",
                String::from_utf8_lossy(&record)
            );
            return Some(SessionOutcome::MalformedInput(e.to_string()));
        }
        Err(e) => {
            warn!("{e}");
            return Some(SessionOutcome::MalformedInput(e.to_string()));
        }
    };

    if let Some(symbol) = &quote.instrument {
        if symbol != formatter.instrument().symbol() {
            debug!("tick for {symbol} while streaming {}", formatter.instrument().symbol());
        }
    }

    let line = match formatter.format(&quote) {
        Ok(line) => line,
        Err(e) => {
            warn!("bad tick: {e}");
            return Some(SessionOutcome::MalformedInput(e.to_string()));
        }
    };

    stats.ticks += 1;
    if let Err(e) = sink.write_tick(&line) {
        error!("failed to write quote: {e}");
        return Some(SessionOutcome::OutputFailed);
    }
    None
}
