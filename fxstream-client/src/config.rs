use std::time::Duration;

use fxstream_core::{Environment, Instrument};

use crate::cli::Args;

pub(crate) use fxstream_core::constants::DEFAULT_INSTRUMENT;

pub(crate) const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Сколько ждать установки TCP/TLS. На сам стрим таймаута нет.
pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Как часто цикл чтения проверяет флаг остановки
pub(crate) const PUMP_TICK: Duration = Duration::from_millis(200);

/// Чанков в очереди между потоком чтения и разбором
pub(crate) const CHUNK_QUEUE_CAPACITY: usize = 64;

/// Сколько тела ошибки показывать в логе
pub(crate) const ERROR_BODY_LIMIT: u64 = 4096;

/// Всё, что нужно для запуска сессии, кроме транспорта и учётных данных
#[derive(Debug, Clone)]
pub(crate) struct StreamConfig {
    pub(crate) instrument: Instrument,
    pub(crate) environment: Environment,
    pub(crate) chunk_size: usize,
    pub(crate) utc: bool,
}

impl StreamConfig {
    pub(crate) fn from_args(args: &Args) -> Self {
        let mut instrument = Instrument::new(args.instrument.trim().to_ascii_uppercase());
        if let Some(scale) = args.pip_scale {
            instrument = instrument.with_pip_scale(scale);
        }

        let environment = if args.live {
            Environment::Live
        } else {
            Environment::Practice
        };

        Self {
            instrument,
            environment,
            chunk_size: args.chunk_size,
            utc: args.utc,
        }
    }
}
