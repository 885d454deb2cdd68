//! Точка входа `fxstream-client`.
//!
//! Жизненный цикл:
//! - парсинг CLI, недостающие токен/счёт спрашиваются у оператора
//! - открытие стрима (HTTP или файл `--replay`)
//! - разбор чанков контроллером из `fxstream-core`, котировки в stdout
//! - корректная остановка по `Ctrl+C`, `disconnect` или концу стрима

mod cli;
mod config;
mod credentials;
mod pump;
mod session;
mod transport;

use std::fmt::Display;
use std::io;
use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};

use anyhow::bail;
use chrono::{TimeZone, Utc};
use clap::Parser;
use fxstream_core::{
    CalendarClock, QuoteFormatter, SessionOutcome, StreamController, StreamRequest, WriterSink,
};
use log::info;

use crate::config::StreamConfig;
use crate::transport::{HttpTransport, ReplayTransport, Transport};

fn main() -> anyhow::Result<()> {
    // По умолчанию info, RUST_LOG перекрывает
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    args.validate()?;

    let cfg = StreamConfig::from_args(&args);

    let transport: Box<dyn Transport> = match &args.replay {
        Some(path) => {
            info!("Replaying {:?}: instrument={}", path, cfg.instrument.symbol());
            Box::new(ReplayTransport::new(path.clone()))
        }
        None => {
            let creds = credentials::resolve_credentials(
                args.token.clone(),
                args.account.clone(),
                &mut io::stdin().lock(),
                &mut io::stderr(),
            )?;
            let request = StreamRequest::new(cfg.environment, &creds, &cfg.instrument);
            info!("Starting fxstream-client: {:?}", request);
            Box::new(HttpTransport::new(request)?)
        }
    };

    // Ctrl+C => shutdown=true. До этой точки (ввод токена/счёта) Ctrl+C
    // завершает процесс сразу
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
            info!("shutting down...");
        })?;
    }

    // зона фиксируется один раз на весь процесс
    let outcome = if cfg.utc {
        stream(transport.as_ref(), CalendarClock::new(Utc), &cfg, shutdown)?
    } else {
        stream(transport.as_ref(), CalendarClock::local(), &cfg, shutdown)?
    };

    if outcome.is_failure() {
        bail!("stream stopped: {outcome}");
    }
    info!("stream stopped: {outcome}");

    Ok(())
}

fn stream<Tz>(
    transport: &dyn Transport,
    clock: CalendarClock<Tz>,
    cfg: &StreamConfig,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<SessionOutcome>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let formatter = QuoteFormatter::new(clock, cfg.instrument.clone());
    let sink = WriterSink::new(io::stdout().lock());
    let mut controller = StreamController::new(formatter, sink);

    session::run_session(transport, &mut controller, cfg.chunk_size, shutdown)
}
