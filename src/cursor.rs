//! The input side of every decoder.
//!
//! A [`Cursor`] borrows the caller's bytes read-only and keeps a position that never
//! passes the end of the buffer. A read that would run past the end fails with
//! [`DecodeError::OutOfData`] and leaves the position where it was.

use crate::config::DecodeConfig;
use crate::error::{DecodeError, Result};

/// A read-only view over encoded bytes with a mutable position.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    config: DecodeConfig,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `data` with the default configuration.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, DecodeConfig::default())
    }

    /// Creates a cursor at the start of `data` with an explicit configuration.
    pub fn with_config(data: &'a [u8], config: DecodeConfig) -> Self {
        Self {
            data,
            pos: 0,
            config,
        }
    }

    /// The limits decoders reading from this cursor must honor.
    #[inline]
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread tail of the input.
    pub fn remaining_bytes(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }

    /// Fails with `OutOfData` unless at least `n` bytes remain.
    #[inline]
    pub fn ensure(&self, n: usize) -> Result<()> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DecodeError::OutOfData {
                needed: n,
                remaining,
            });
        }
        Ok(())
    }

    /// Returns the next byte without consuming it.
    pub fn peek_byte(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Consumes one byte.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte().ok_or(DecodeError::OutOfData {
            needed: 1,
            remaining: 0,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Consumes `n` bytes and returns them as a borrowed slice.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let start = self.pos;
        let bytes = self
            .data
            .get(start..start + n)
            .ok_or(DecodeError::OutOfData {
                needed: n,
                remaining: self.remaining(),
            })?;
        self.pos += n;
        Ok(bytes)
    }

    /// Consumes exactly `N` bytes into an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_position() {
        let data = [1, 2, 3, 4, 5];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_byte(), Ok(1));
        assert_eq!(cursor.read_array::<2>(), Ok([2, 3]));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining_bytes(), &[4, 5]);
    }

    #[test]
    fn short_read_fails_without_moving() {
        let data = [1, 2, 3];
        let mut cursor = Cursor::new(&data);
        cursor.read_byte().unwrap();
        assert_eq!(
            cursor.read_array::<4>(),
            Err(DecodeError::OutOfData {
                needed: 4,
                remaining: 2
            })
        );
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn empty_input_reports_out_of_data() {
        let mut cursor = Cursor::new(&[]);
        assert!(cursor.is_empty());
        assert_eq!(
            cursor.read_byte(),
            Err(DecodeError::OutOfData {
                needed: 1,
                remaining: 0
            })
        );
    }
}
