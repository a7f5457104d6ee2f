//! Fixed-width integer codec.
//!
//! An integer of `W` bits is written as exactly `W / 8` bytes, least significant byte
//! first. Signed integers use the two's-complement bit pattern of the same width, so
//! `-1i16` is `[0xFF, 0xFF]`. The width always comes from the declared type: there is
//! no implicit widening or truncation, and `usize`/`isize` are deliberately not
//! encodable because their width is platform dependent.
//!
//! The 256- and 512-bit types live in [`crate::wide`] and follow the same rule.

use crate::codec::{Decodable, Encodable};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::sink::Output;

macro_rules! impl_fixed_width {
    ($($t:ty),* $(,)?) => {
        $(
            impl Encodable for $t {
                #[inline]
                fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
                    dest.write(&self.to_le_bytes());
                }

                #[inline]
                fn size_hint(&self) -> usize {
                    std::mem::size_of::<$t>()
                }
            }

            impl Decodable for $t {
                #[inline]
                fn decode(input: &mut Cursor<'_>) -> Result<Self> {
                    Ok(<$t>::from_le_bytes(input.read_array()?))
                }
            }
        )*
    };
}

impl_fixed_width!(u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl Encodable for u8 {
    #[inline]
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        dest.push_byte(*self);
    }

    #[inline]
    fn size_hint(&self) -> usize {
        1
    }
}

impl Decodable for u8 {
    #[inline]
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        input.read_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    fn decode_all<T: Decodable>(bytes: &[u8]) -> Result<T> {
        T::decode(&mut Cursor::new(bytes))
    }

    #[test]
    fn little_endian_layout() {
        assert_eq!(0x0102_0304u32.encode(), [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(1u64.encode(), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(u16::MAX.encode(), [0xFF, 0xFF]);
    }

    #[test]
    fn twos_complement_signed() {
        assert_eq!((-1i16).encode(), [0xFF, 0xFF]);
        assert_eq!(i8::MIN.encode(), [0x80]);
        assert_eq!((-2i32).encode(), [0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(decode_all::<i32>(&[0xFE, 0xFF, 0xFF, 0xFF]), Ok(-2));
        assert_eq!(decode_all::<i64>(&(-42i64).to_le_bytes()), Ok(-42));
    }

    #[test]
    fn extreme_values_round_trip() {
        for v in [i128::MIN, -1, 0, 1, i128::MAX] {
            assert_eq!(decode_all::<i128>(&v.encode()), Ok(v));
        }
        for v in [0u128, 1, u128::MAX] {
            assert_eq!(decode_all::<u128>(&v.encode()), Ok(v));
        }
    }

    #[test]
    fn truncated_u32_is_out_of_data() {
        assert_eq!(
            decode_all::<u32>(&[1, 2, 3]),
            Err(DecodeError::OutOfData {
                needed: 4,
                remaining: 3
            })
        );
    }

    #[test]
    fn decoding_consumes_exactly_width() {
        let bytes = [0x34, 0x12, 0xAA];
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(u16::decode(&mut cursor), Ok(0x1234));
        assert_eq!(cursor.remaining(), 1);
    }
}
