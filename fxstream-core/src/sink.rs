use std::io::{self, Write};

use crate::types::DisplayLine;

/// Куда пишутся строки котировок
pub trait TickSink {
    /// Записать одну строку котировки
    fn write_tick(&mut self, line: &DisplayLine) -> io::Result<()>;
}

/// Для тестов и встраивания: просто копим строки
impl TickSink for Vec<DisplayLine> {
    fn write_tick(&mut self, line: &DisplayLine) -> io::Result<()> {
        self.push(line.clone());
        Ok(())
    }
}

/// Построчный вывод в любой `Write` (stdout, файл).
/// Сбрасываем буфер после каждой строки, чтобы котировки не залеживались.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    /// Оборачивает `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Вернуть writer обратно
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TickSink for WriterSink<W> {
    fn write_tick(&mut self, line: &DisplayLine) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(bid: f64) -> DisplayLine {
        DisplayLine {
            timestamp: "[2015-01-01 00:00:00]".to_string(),
            bid,
            ask: bid + 0.01,
            spread: 1.0,
        }
    }

    #[test]
    fn writer_sink_writes_one_line_per_tick() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_tick(&line(1.0)).unwrap();
        sink.write_tick(&line(2.0)).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "[2015-01-01 00:00:00] bid: 1.000 ask: 1.010 sp: 1.0\n\
             [2015-01-01 00:00:00] bid: 2.000 ask: 2.010 sp: 1.0\n"
        );
    }

    #[test]
    fn writer_sink_reports_io_errors() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = WriterSink::new(Closed).write_tick(&line(1.0)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
