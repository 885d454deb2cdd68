//! # fxstream-core
//!
//! Разбор стрима котировок вендора: байтовые чанки из долгоживущего
//! HTTP-соединения -> записи -> JSON-документы -> тики / heartbeat / disconnect.
//!
//! Этот крейт содержит:
//!
//! - [`framer`] — нарезка потока на записи по `\r\n` с хранением хвоста
//! - [`document`] — разбор записи в JSON-объект
//! - [`classify`] — heartbeat / tick / disconnect
//! - [`format`] — строка вывода: время, bid, ask, спред
//! - [`clock`] — вендорская метка времени -> `[YYYY-MM-DD HH:MM:SS]`
//! - [`session`] — контроллер сессии и её итог
//! - [`request`] — параметры стрим-запроса для транспорта
//! - [`sink`] — вывод строк котировок
//! - [`types`] — доменные типы
//! - [`error`] — типы ошибок
//!
//! ## Пример: одна сессия
//!
//! ```rust
//! use chrono::Utc;
//! use fxstream_core::{CalendarClock, Instrument, QuoteFormatter, SessionOutcome, StreamController};
//!
//! let fmt = QuoteFormatter::new(CalendarClock::new(Utc), Instrument::default());
//! let mut session = StreamController::new(fmt, Vec::new());
//!
//! let out = session.on_chunk(b"{\"tick\":{\"time\":\"1420070400123456\",\"bid\":120.123,\"ask\":120.156}}\r\n");
//! assert_eq!(out, SessionOutcome::Continue);
//! assert_eq!(
//!     session.sink()[0].to_string(),
//!     "[2015-01-01 00:00:00] bid: 120.123 ask: 120.156 sp: 3.3"
//! );
//!
//! assert_eq!(session.finish(200), SessionOutcome::Normal);
//! ```
//!
//! ## Дизайн
//!
//! Никакого рантайма и сетевого ввода-вывода: транспорт живёт в
//! `fxstream-client` и просто кормит [`StreamController`] чанками.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Нарезка потока на записи.
pub mod framer;

/// Разбор записи в JSON-объект.
pub mod document;

/// Классификация сообщений стрима.
pub mod classify;

/// Форматирование тика.
pub mod format;

/// Календарное время из вендорской метки.
pub mod clock;

/// Контроллер стрим-сессии.
pub mod session;

/// Параметры запроса к стриму.
pub mod request;

/// Вывод котировок.
pub mod sink;

/// Доменные типы.
pub mod types;

/// Ошибки `fxstream-core`.
pub mod error;

/// Общие константы
pub mod constants;

// --- Re-exports (публичный фасад API) ---

pub use crate::classify::Message;
pub use crate::clock::CalendarClock;
pub use crate::error::{CoreError, DocumentError, TickError, TimeError};
pub use crate::format::QuoteFormatter;
pub use crate::framer::RecordFramer;
pub use crate::request::{Credentials, Environment, StreamRequest};
pub use crate::session::{SessionOutcome, SessionState, SessionStats, StreamController};
pub use crate::sink::{TickSink, WriterSink};
pub use crate::types::{DisconnectNotice, DisplayLine, Instrument, QuoteEvent};
