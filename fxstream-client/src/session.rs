use std::fmt::Display;
use std::io::Read;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use chrono::TimeZone;
use fxstream_core::{SessionOutcome, StreamController, TickSink};
use log::{debug, error, info};

use crate::config::ERROR_BODY_LIMIT;
use crate::pump::{PumpEnd, pump_chunks};
use crate::transport::Transport;

/// Одна сессия: открыть транспорт, прокачать тело через контроллер,
/// закрыть со статусом соединения.
pub(crate) fn run_session<T, Tz, S>(
    transport: &T,
    controller: &mut StreamController<Tz, S>,
    chunk_size: usize,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<SessionOutcome>
where
    T: Transport + ?Sized,
    Tz: TimeZone,
    Tz::Offset: Display,
    S: TickSink,
{
    if shutdown.load(Ordering::Relaxed) {
        return Ok(controller.cancel());
    }

    let resp = transport.open()?;
    let status = resp.status;

    if !(200..300).contains(&status) {
        let mut raw = Vec::new();
        if let Err(e) = resp.body.take(ERROR_BODY_LIMIT).read_to_end(&mut raw) {
            debug!("failed to read error body: {e}");
        }
        error!(
            "HTTP code Error {status}: {}",
            String::from_utf8_lossy(&raw).trim()
        );
        return Ok(controller.finish(status));
    }

    info!("stream opened (HTTP {status})");

    let end = pump_chunks(resp.body, chunk_size, shutdown, |chunk| {
        !controller.on_chunk(chunk).is_terminal()
    })?;

    Ok(match end {
        PumpEnd::Eof | PumpEnd::Stopped => controller.finish(status),
        PumpEnd::Shutdown => controller.cancel(),
    })
}
