//! Tagged-union support.
//!
//! A type with variants `V0..V(n-1)` encodes as one tag byte equal to the variant's
//! declaration index, followed by that variant's payload. The tag is never inferred from
//! the payload, and a tag at or beyond `n` is rejected with
//! [`DecodeError::InvalidVariantIndex`]. Since the tag is a single byte, `n <= 256`.
//!
//! `#[derive(Encodable, Decodable)]` on an enum generates code on top of the helpers in
//! this module; `Result<T, E>` and `Option<T>` use them directly.

use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::sink::Output;

/// Largest number of variants a one-byte tag can address.
pub const MAX_VARIANTS: usize = 256;

/// Static description of a closed, ordered set of variants.
pub trait Variants {
    /// Number of declared variants.
    const VARIANT_COUNT: usize;

    /// Declaration index of the variant `self` holds.
    fn variant_index(&self) -> u8;
}

/// Writes a variant tag.
#[inline]
pub fn encode_variant_index<O: Output + ?Sized>(index: u8, dest: &mut O) {
    dest.push_byte(index);
}

/// Reads a variant tag and checks it against the declared variant count.
#[inline]
pub fn decode_variant_index(input: &mut Cursor<'_>, count: usize) -> Result<u8> {
    let index = input.read_byte()?;
    if usize::from(index) >= count {
        return Err(DecodeError::InvalidVariantIndex { index, count });
    }
    Ok(index)
}

/// Error for a fieldless enum whose discriminant matched none of its values.
pub fn invalid_enum_value(type_name: &'static str) -> DecodeError {
    DecodeError::InvalidEnumValue { type_name }
}

impl<T> Variants for Option<T> {
    const VARIANT_COUNT: usize = 2;

    fn variant_index(&self) -> u8 {
        u8::from(self.is_some())
    }
}

impl<T, E> Variants for std::result::Result<T, E> {
    const VARIANT_COUNT: usize = 2;

    fn variant_index(&self) -> u8 {
        u8::from(self.is_err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_in_range_is_accepted() {
        let mut cursor = Cursor::new(&[0x01, 0xAA]);
        assert_eq!(decode_variant_index(&mut cursor, 2), Ok(1));
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn tag_out_of_range_is_rejected() {
        let mut cursor = Cursor::new(&[0xFF]);
        assert_eq!(
            decode_variant_index(&mut cursor, 2),
            Err(DecodeError::InvalidVariantIndex {
                index: 0xFF,
                count: 2
            })
        );
    }

    #[test]
    fn full_byte_range_is_addressable() {
        let mut cursor = Cursor::new(&[0xFF]);
        assert_eq!(decode_variant_index(&mut cursor, MAX_VARIANTS), Ok(0xFF));
    }

    #[test]
    fn empty_input_is_out_of_data() {
        let mut cursor = Cursor::new(&[]);
        assert_eq!(
            decode_variant_index(&mut cursor, 2),
            Err(DecodeError::OutOfData {
                needed: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn std_unions_report_indices() {
        assert_eq!(None::<u8>.variant_index(), 0);
        assert_eq!(Some(3u8).variant_index(), 1);
        assert_eq!(Ok::<u8, u8>(1).variant_index(), 0);
        assert_eq!(Err::<u8, u8>(1).variant_index(), 1);
    }
}
