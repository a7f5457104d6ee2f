//! The output side of every encoder.
//!
//! An encode call owns its sink exclusively for its whole duration and only ever
//! appends to it. `Vec<u8>` is the sink handed back to callers as the finished
//! encoding; [`SizeCounter`] runs the same encoders but keeps only the byte count.

/// An append-only byte destination.
pub trait Output {
    /// Appends `bytes` to the end of the sink.
    fn write(&mut self, bytes: &[u8]);

    /// Appends a single byte.
    fn push_byte(&mut self, byte: u8) {
        self.write(&[byte]);
    }
}

impl Output for Vec<u8> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    #[inline]
    fn push_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// A sink that discards data and counts how many bytes were written.
///
/// Backs [`Encodable::encoded_size`](crate::Encodable::encoded_size).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SizeCounter {
    written: usize,
}

impl SizeCounter {
    /// Creates a counter at zero.
    pub const fn new() -> Self {
        Self { written: 0 }
    }

    /// Bytes written so far.
    pub const fn count(&self) -> usize {
        self.written
    }
}

impl Output for SizeCounter {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.written += bytes.len();
    }

    #[inline]
    fn push_byte(&mut self, _byte: u8) {
        self.written += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_appends_in_order() {
        let mut sink = Vec::new();
        sink.push_byte(0x01);
        sink.write(&[0x02, 0x03]);
        assert_eq!(sink, [0x01, 0x02, 0x03]);
    }

    #[test]
    fn counter_tracks_without_storing() {
        let mut counter = SizeCounter::new();
        counter.write(&[0; 17]);
        counter.push_byte(9);
        assert_eq!(counter.count(), 18);
    }
}
