//! Character sources and the pushback cursor the scanners read through.
//!
//! A [`CharSource`] only has to hand out characters one at a time. Lookahead
//! is provided by [`Cursor`], which keeps a small stack of pushed-back
//! characters together with how many source characters each one stands for,
//! so that offsets stay exact when a half-width kana and its voicing mark
//! were merged into one character.

use std::io::{self, BufRead, Read};

use crate::error::{KanabigramError, Result};

/// How many characters may be pushed back at once.
pub const PUSHBACK_DEPTH: usize = 2;

/// A pull-based source of characters.
pub trait CharSource {
    /// Read the next character, `Ok(None)` at end of input.
    fn read_char(&mut self) -> Result<Option<char>>;
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn read_char(&mut self) -> Result<Option<char>> {
        (**self).read_char()
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_char(&mut self) -> Result<Option<char>> {
        (**self).read_char()
    }
}

/// Adapts any `char` iterator, e.g. `"text".chars()`.
#[derive(Clone, Debug)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    pub fn new(iter: I) -> Self {
        IterSource { iter }
    }
}

impl<'a> From<&'a str> for IterSource<std::str::Chars<'a>> {
    fn from(text: &'a str) -> Self {
        IterSource::new(text.chars())
    }
}

impl<I: Iterator<Item = char>> CharSource for IterSource<I> {
    #[inline]
    fn read_char(&mut self) -> Result<Option<char>> {
        Ok(self.iter.next())
    }
}

/// Decodes UTF-8 from a buffered byte reader.
///
/// I/O failures surface as [`KanabigramError::Io`], malformed or truncated
/// sequences as [`KanabigramError::InvalidUtf8`].
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    byte_offset: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader,
            byte_offset: 0,
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match Read::read_exact(&mut self.reader, &mut byte) {
            Ok(()) => {
                self.byte_offset += 1;
                Ok(Some(byte[0]))
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn read_char(&mut self) -> Result<Option<char>> {
        let start = self.byte_offset;
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };
        let width = match lead {
            0x00..=0x7F => return Ok(Some(lead as char)),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(KanabigramError::InvalidUtf8 { offset: start }),
        };

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self
                .read_byte()?
                .ok_or(KanabigramError::InvalidUtf8 { offset: start })?;
        }
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or(KanabigramError::InvalidUtf8 { offset: start })
    }
}

/// A character handed out by the cursor with the number of source
/// characters it covers (2 for a merged half-width kana, else 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Unit {
    pub value: char,
    pub width: usize,
}

/// Position-tracking reader with pushback over a [`CharSource`].
#[derive(Debug)]
pub(crate) struct Cursor<S> {
    source: S,
    pushed: Vec<Unit>,
    consumed: usize,
    exhausted: bool,
}

impl<S: CharSource> Cursor<S> {
    pub fn new(source: S) -> Self {
        Cursor {
            source,
            pushed: Vec::with_capacity(PUSHBACK_DEPTH),
            consumed: 0,
            exhausted: false,
        }
    }

    /// Number of source characters consumed so far, net of pushback.
    #[inline]
    pub fn position(&self) -> usize {
        self.consumed
    }

    /// Read the next unit, pushed-back units first.
    pub fn read(&mut self) -> Result<Option<Unit>> {
        if let Some(unit) = self.pushed.pop() {
            self.consumed += unit.width;
            return Ok(Some(unit));
        }
        if self.exhausted {
            return Ok(None);
        }
        match self.source.read_char()? {
            Some(value) => {
                self.consumed += 1;
                Ok(Some(Unit { value, width: 1 }))
            }
            None => {
                self.exhausted = true;
                Ok(None)
            }
        }
    }

    /// Return a unit so that the next [`Cursor::read`] yields it again.
    pub fn unread(&mut self, unit: Unit) {
        debug_assert!(self.pushed.len() < PUSHBACK_DEPTH, "pushback overflow");
        self.consumed -= unit.width;
        self.pushed.push(unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<S: CharSource>(mut source: S) -> Result<String> {
        let mut out = String::new();
        while let Some(c) = source.read_char()? {
            out.push(c);
        }
        Ok(out)
    }

    #[test]
    fn test_iter_source() {
        let source = IterSource::from("ﾊﾟｰｸ");
        assert_eq!(drain(source).unwrap(), "ﾊﾟｰｸ");
    }

    #[test]
    fn test_reader_source_decodes_utf8() {
        let text = "a☆ひ𠀋";
        let source = ReaderSource::new(text.as_bytes());
        assert_eq!(drain(source).unwrap(), text);
    }

    #[test]
    fn test_reader_source_rejects_bad_utf8() {
        let bytes: &[u8] = &[b'a', 0xE3, 0x81];
        let err = drain(ReaderSource::new(bytes)).unwrap_err();
        assert!(matches!(err, KanabigramError::InvalidUtf8 { offset: 1 }));

        let bytes: &[u8] = &[0xFF];
        let err = drain(ReaderSource::new(bytes)).unwrap_err();
        assert!(matches!(err, KanabigramError::InvalidUtf8 { offset: 0 }));
    }

    #[test]
    fn test_cursor_pushback_tracks_width() {
        let mut cursor = Cursor::new(IterSource::from("ﾎﾞx"));
        cursor.read().unwrap().unwrap();
        cursor.read().unwrap().unwrap();
        assert_eq!(cursor.position(), 2);

        cursor.unread(Unit {
            value: 'ボ',
            width: 2,
        });
        assert_eq!(cursor.position(), 0);

        let merged = cursor.read().unwrap().unwrap();
        assert_eq!(merged.value, 'ボ');
        assert_eq!(cursor.position(), 2);

        let x = cursor.read().unwrap().unwrap();
        assert_eq!(
            x,
            Unit {
                value: 'x',
                width: 1
            }
        );
        assert_eq!(cursor.position(), 3);

        assert!(cursor.read().unwrap().is_none());
        assert!(cursor.read().unwrap().is_none());
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_cursor_pushback_is_lifo() {
        let mut cursor = Cursor::new(IterSource::from("ab"));
        let a = cursor.read().unwrap().unwrap();
        let b = cursor.read().unwrap().unwrap();
        cursor.unread(b);
        cursor.unread(a);
        assert_eq!(cursor.read().unwrap().unwrap().value, 'a');
        assert_eq!(cursor.read().unwrap().unwrap().value, 'b');
    }
}
