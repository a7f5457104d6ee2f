//! Packed bit sequences.
//!
//! A [`BitVec`] encodes as a compact bit count followed by `ceil(count / 8)` bytes.
//! Bits are packed least-significant-first within each byte; unused high bits of the
//! last byte are written as zero and ignored when decoding.

use crate::codec::{Decodable, Encodable};
use crate::compact::{compact_len, decode_length, encode_length};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::sink::Output;

/// An ordered sequence of bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitVec {
    bits: Vec<bool>,
}

impl BitVec {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Bit at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if there are no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterates the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Bytes the packed payload occupies.
    pub fn byte_len(&self) -> usize {
        self.bits.len().div_ceil(8)
    }

    fn packed(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | (u8::from(bit) << i))
            })
            .collect()
    }
}

impl From<Vec<bool>> for BitVec {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl Encodable for BitVec {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_length(self.bits.len(), dest);
        dest.write(&self.packed());
    }

    fn size_hint(&self) -> usize {
        compact_len(&(self.bits.len() as u64)) + self.byte_len()
    }
}

impl Decodable for BitVec {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        let len = decode_length(input)?;
        let bytes = input.read_bytes(len.div_ceil(8))?;
        let bits = bytes
            .iter()
            .flat_map(|&byte| (0..8).map(move |i| byte & (1 << i) != 0))
            .take(len)
            .collect();
        Ok(Self { bits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecodeConfig;
    use crate::error::DecodeError;

    #[test]
    fn seven_bits_pack_into_one_byte() {
        let bits: BitVec = [true, true, false, false, false, false, true]
            .into_iter()
            .collect();
        assert_eq!(bits.encode(), [7 << 2, 0b0100_0011]);
        assert_eq!(bits.encoded_size(), 2);
        assert_eq!(BitVec::decode(&mut Cursor::new(&bits.encode())), Ok(bits));
    }

    #[test]
    fn spills_into_second_byte() {
        let bits = BitVec::from(vec![true; 9]);
        assert_eq!(bits.encode(), [9 << 2, 0xFF, 0x01]);
    }

    #[test]
    fn empty_is_zero_prefix() {
        assert_eq!(BitVec::new().encode(), [0x00]);
        assert_eq!(BitVec::decode(&mut Cursor::new(&[0x00])), Ok(BitVec::new()));
    }

    #[test]
    fn missing_payload_is_out_of_data() {
        assert_eq!(
            BitVec::decode(&mut Cursor::new(&[17 << 2, 0xFF])),
            Err(DecodeError::OutOfData {
                needed: 3,
                remaining: 1
            })
        );
    }

    #[test]
    fn bit_count_honors_cap() {
        let config = DecodeConfig::new().with_max_collection_len(8);
        assert_eq!(
            BitVec::decode(&mut Cursor::with_config(&[9 << 2, 0xFF, 0x01], config)),
            Err(DecodeError::LengthOverflow { len: 9, max: 8 })
        );
    }
}
