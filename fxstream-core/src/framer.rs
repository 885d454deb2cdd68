//! Нарезка сырого потока байт на записи по `\r\n`.
//!
//! Буфер принадлежит одному экземпляру [`RecordFramer`] (одна сессия).
//! Вместо стирания головы буфера на каждую запись держим курсор чтения и
//! сдвигаем хвост только при следующем `feed`, так что суммарная
//! стоимость линейна по числу байт.

use crate::constants::RECORD_DELIMITER;

/// Одна запись без разделителя. Владеет своими байтами.
pub type Record = Vec<u8>;

/// Накопитель байт одной стрим-сессии
#[derive(Debug, Default)]
pub struct RecordFramer {
    buf: Vec<u8>,
    /// начало ещё не выданных данных
    cursor: usize,
    /// с какого места продолжать поиск разделителя
    scan_from: usize,
}

impl RecordFramer {
    /// Пустой буфер
    pub fn new() -> Self {
        Self::default()
    }

    /// Дописывает чанк и возвращает ленивый итератор по готовым записям.
    ///
    /// Пустые записи (keep-alive пустые строки) пропускаются.
    /// Невыбранные из итератора записи остаются в буфере до следующего вызова.
    pub fn feed(&mut self, chunk: &[u8]) -> Records<'_> {
        self.compact();
        self.buf.extend_from_slice(chunk);
        Records { framer: self }
    }

    /// Сколько байт лежит в буфере (включая неполную запись)
    pub fn pending(&self) -> usize {
        self.buf.len() - self.cursor
    }

    fn compact(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.buf.drain(..self.cursor);
        self.scan_from -= self.cursor;
        self.cursor = 0;
    }

    fn next_record(&mut self) -> Option<Record> {
        loop {
            let start = self.scan_from.max(self.cursor);
            let found = self.buf[start..]
                .windows(RECORD_DELIMITER.len())
                .position(|w| w == RECORD_DELIMITER);

            let Some(rel) = found else {
                // `\r` в самом конце мог быть первой половиной разделителя
                self.scan_from = self.buf.len().saturating_sub(1).max(self.cursor);
                return None;
            };

            let end = start + rel;
            let record = self.buf[self.cursor..end].to_vec();
            self.cursor = end + RECORD_DELIMITER.len();
            self.scan_from = self.cursor;

            if !record.is_empty() {
                return Some(record);
            }
        }
    }
}

/// Записи, готовые после очередного `feed`.
pub struct Records<'a> {
    framer: &'a mut RecordFramer,
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.framer.next_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all<C: AsRef<[u8]>>(framer: &mut RecordFramer, chunks: &[C]) -> Vec<String> {
        chunks
            .iter()
            .flat_map(|c| framer.feed(c.as_ref()).collect::<Vec<_>>())
            .map(|r| String::from_utf8(r).unwrap())
            .collect()
    }

    #[test]
    fn partial_record_is_kept_until_delimiter_arrives() {
        let mut framer = RecordFramer::new();

        assert_eq!(framer.feed(b"abc").count(), 0);
        assert_eq!(framer.pending(), 3);

        let got: Vec<_> = framer.feed(b"def\r\n").collect();
        assert_eq!(got, vec![b"abcdef".to_vec()]);
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn empty_records_are_dropped() {
        let mut framer = RecordFramer::new();
        assert_eq!(framer.feed(b"\r\n\r\n").count(), 0);
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn several_records_in_one_chunk() {
        let mut framer = RecordFramer::new();
        let got = feed_all(&mut framer, &["one\r\n\r\ntwo\r\nthr"]);
        assert_eq!(got, vec!["one", "two"]);
        assert_eq!(framer.pending(), 3);

        let got = feed_all(&mut framer, &["ee\r\n"]);
        assert_eq!(got, vec!["three"]);
    }

    #[test]
    fn delimiter_split_between_chunks() {
        let mut framer = RecordFramer::new();
        assert_eq!(framer.feed(b"abc\r").count(), 0);

        let got = feed_all(&mut framer, &["\nxyz\r", "\n"]);
        assert_eq!(got, vec!["abc", "xyz"]);
    }

    #[test]
    fn lone_cr_or_lf_is_not_a_delimiter() {
        let mut framer = RecordFramer::new();
        let got = feed_all(&mut framer, &["a\rb\nc", "\r\n"]);
        assert_eq!(got, vec!["a\rb\nc"]);
    }

    #[test]
    fn any_chunking_yields_the_same_records() {
        let records = [
            r#"{"tick":{"time":"1420070400123456","bid":120.123,"ask":120.156}}"#,
            r#"{"heartbeat":{"time":"1420070401000000"}}"#,
            "x",
            r#"{"disconnect":{"code":60}}"#,
        ];
        let stream: Vec<u8> = records
            .iter()
            .flat_map(|r| r.bytes().chain(*RECORD_DELIMITER))
            .collect();

        for size in 1..=stream.len() {
            let mut framer = RecordFramer::new();
            let chunks: Vec<&[u8]> = stream.chunks(size).collect();
            let got = feed_all(&mut framer, &chunks);

            assert_eq!(got, records, "chunk size {size}");
            assert_eq!(framer.pending(), 0, "chunk size {size}");
        }
    }

    #[test]
    fn unconsumed_records_survive_until_next_feed() {
        let mut framer = RecordFramer::new();

        let first = framer.feed(b"a\r\nb\r\n").next();
        assert_eq!(first, Some(b"a".to_vec()));

        let got = feed_all(&mut framer, &["c\r\n"]);
        assert_eq!(got, vec!["b", "c"]);
    }
}
