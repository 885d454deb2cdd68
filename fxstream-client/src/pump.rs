use std::io::{ErrorKind, Read};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;

use crossbeam_channel::{RecvTimeoutError, Sender};
use log::{debug, warn};

use crate::config::{CHUNK_QUEUE_CAPACITY, PUMP_TICK};

/// Чем закончилась перекачка
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PumpEnd {
    /// тело дочитано до конца
    Eof,
    /// обработчик попросил остановиться
    Stopped,
    /// выставлен флаг shutdown
    Shutdown,
}

/// Читает `reader` в отдельном потоке и отдаёт чанки в `on_chunk` строго по
/// порядку прихода. `on_chunk` возвращает `false`, чтобы прекратить чтение.
///
/// Блокирующий `read` нельзя прервать, поэтому он живёт в своём потоке, а
/// этот цикл раз в [`PUMP_TICK`] смотрит на `shutdown`.
pub(crate) fn pump_chunks<R, F>(
    reader: R,
    chunk_size: usize,
    shutdown: Arc<AtomicBool>,
    mut on_chunk: F,
) -> anyhow::Result<PumpEnd>
where
    R: Read + Send + 'static,
    F: FnMut(&[u8]) -> bool,
{
    let (tx, rx) = crossbeam_channel::bounded(CHUNK_QUEUE_CAPACITY);
    let h = thread::spawn(move || read_loop(reader, chunk_size, tx));

    let end = loop {
        if shutdown.load(Ordering::Relaxed) {
            break PumpEnd::Shutdown;
        }

        match rx.recv_timeout(PUMP_TICK) {
            Ok(Ok(chunk)) => {
                if !on_chunk(&chunk) {
                    break PumpEnd::Stopped;
                }
            }
            Ok(Err(e)) => {
                return Err(anyhow::Error::new(e).context("stream read failed"));
            }
            Err(RecvTimeoutError::Timeout) => {
                // просто "тик" цикла
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => break PumpEnd::Eof,
        }
    };

    if end == PumpEnd::Eof {
        if h.join().is_err() {
            warn!("reader thread panicked");
        }
    } else {
        // поток может висеть в read(); он завершится на следующем send
        debug!("leaving reader thread behind ({end:?})");
    }

    Ok(end)
}

fn read_loop<R: Read>(mut reader: R, chunk_size: usize, tx: Sender<std::io::Result<Vec<u8>>>) {
    let mut buf = vec![0u8; chunk_size];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return,
            Ok(n) => {
                if tx.send(Ok(buf[..n].to_vec())).is_err() {
                    // принимающая сторона уже ушла
                    return;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                let _ = tx.send(Err(e));
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    fn no_shutdown() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(false))
    }

    #[test]
    fn delivers_all_bytes_in_order() {
        let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let mut got = Vec::new();

        let end = pump_chunks(Cursor::new(data.clone()), 333, no_shutdown(), |c| {
            assert!(c.len() <= 333);
            got.extend_from_slice(c);
            true
        })
        .unwrap();

        assert_eq!(end, PumpEnd::Eof);
        assert_eq!(got, data);
    }

    #[test]
    fn handler_can_stop_early() {
        let mut calls = 0;
        let end = pump_chunks(Cursor::new(vec![1u8; 100]), 10, no_shutdown(), |_| {
            calls += 1;
            calls < 3
        })
        .unwrap();

        assert_eq!(end, PumpEnd::Stopped);
        assert_eq!(calls, 3);
    }

    #[test]
    fn shutdown_flag_wins() {
        let shutdown = Arc::new(AtomicBool::new(true));
        let end = pump_chunks(Cursor::new(vec![1u8; 10]), 4, shutdown, |_| {
            panic!("no chunks expected after shutdown")
        })
        .unwrap();
        assert_eq!(end, PumpEnd::Shutdown);
    }

    #[test]
    fn read_error_is_reported() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            }
        }

        let err = pump_chunks(Failing, 16, no_shutdown(), |_| true).unwrap_err();
        assert!(err.to_string().contains("stream read failed"));
    }
}
