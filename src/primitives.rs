//! Booleans, unit, options, results, strings and pointer-like wrappers.

use std::borrow::Cow;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use crate::codec::{Decodable, Encodable};
use crate::compact::{compact_len, decode_length, encode_length};
use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::sink::Output;
use crate::variant::{Variants, decode_variant_index, encode_variant_index};

impl Encodable for bool {
    #[inline]
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        dest.push_byte(u8::from(*self));
    }

    fn size_hint(&self) -> usize {
        1
    }
}

impl Decodable for bool {
    #[inline]
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        match input.read_byte()? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            other => Err(DecodeError::InvalidBoolean(other)),
        }
    }
}

impl Encodable for () {
    fn encode_to<O: Output + ?Sized>(&self, _dest: &mut O) {}
}

impl Decodable for () {
    fn decode(_input: &mut Cursor<'_>) -> Result<Self> {
        Ok(())
    }
}

impl<T> Encodable for PhantomData<T> {
    fn encode_to<O: Output + ?Sized>(&self, _dest: &mut O) {}
}

impl<T> Decodable for PhantomData<T> {
    fn decode(_input: &mut Cursor<'_>) -> Result<Self> {
        Ok(PhantomData)
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        match self {
            None => dest.push_byte(0x00),
            Some(value) => {
                dest.push_byte(0x01);
                value.encode_to(dest);
            }
        }
    }

    fn size_hint(&self) -> usize {
        1 + self.as_ref().map_or(0, Encodable::size_hint)
    }
}

impl<T: Decodable> Decodable for Option<T> {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        match input.read_byte()? {
            0x00 => Ok(None),
            0x01 => T::decode(input).map(Some),
            other => Err(DecodeError::InvalidOptionTag(other)),
        }
    }
}

/// An optional boolean packed into a single byte.
///
/// `None` is `0x00`, `Some(true)` is `0x01` and `Some(false)` is `0x02`. Plain
/// `Option<bool>` keeps the generic two-byte layout; use this wrapper where a format
/// calls for the packed form.
///
/// ```rust
/// use scalecodec::{Encodable, OptionBool};
///
/// assert_eq!(OptionBool(Some(false)).encode(), [0x02]);
/// assert_eq!(Some(false).encode(), [0x01, 0x00]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OptionBool(pub Option<bool>);

impl From<Option<bool>> for OptionBool {
    fn from(value: Option<bool>) -> Self {
        Self(value)
    }
}

impl From<OptionBool> for Option<bool> {
    fn from(value: OptionBool) -> Self {
        value.0
    }
}

impl Encodable for OptionBool {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        dest.push_byte(match self.0 {
            None => 0x00,
            Some(true) => 0x01,
            Some(false) => 0x02,
        });
    }

    fn size_hint(&self) -> usize {
        1
    }
}

impl Decodable for OptionBool {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        match input.read_byte()? {
            0x00 => Ok(Self(None)),
            0x01 => Ok(Self(Some(true))),
            0x02 => Ok(Self(Some(false))),
            other => Err(DecodeError::InvalidOptionTag(other)),
        }
    }
}

impl<T: Encodable, E: Encodable> Encodable for std::result::Result<T, E> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_variant_index(self.variant_index(), dest);
        match self {
            Ok(value) => value.encode_to(dest),
            Err(err) => err.encode_to(dest),
        }
    }

    fn size_hint(&self) -> usize {
        1 + match self {
            Ok(value) => value.size_hint(),
            Err(err) => err.size_hint(),
        }
    }
}

impl<T: Decodable, E: Decodable> Decodable for std::result::Result<T, E> {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        match decode_variant_index(input, Self::VARIANT_COUNT)? {
            0 => T::decode(input).map(Ok),
            _ => E::decode(input).map(Err),
        }
    }
}

impl Encodable for str {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_length(self.len(), dest);
        dest.write(self.as_bytes());
    }

    fn size_hint(&self) -> usize {
        compact_len(&(self.len() as u64)) + self.len()
    }
}

impl Encodable for String {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        self.as_str().encode_to(dest);
    }

    fn size_hint(&self) -> usize {
        self.as_str().size_hint()
    }
}

impl Decodable for String {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        let len = decode_length(input)?;
        let bytes = input.read_bytes(len)?;
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }
}

macro_rules! impl_transparent_encode {
    ($($ptr:ident),*) => {
        $(
            impl<T: Encodable + ?Sized> Encodable for $ptr<T> {
                fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
                    (**self).encode_to(dest);
                }

                fn size_hint(&self) -> usize {
                    (**self).size_hint()
                }
            }

            impl<T: Decodable> Decodable for $ptr<T> {
                fn decode(input: &mut Cursor<'_>) -> Result<Self> {
                    T::decode(input).map($ptr::new)
                }
            }
        )*
    };
}

impl_transparent_encode!(Box, Rc, Arc);

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        (**self).encode_to(dest);
    }

    fn size_hint(&self) -> usize {
        (**self).size_hint()
    }
}

impl<T> Encodable for Cow<'_, T>
where
    T: Encodable + ToOwned + ?Sized,
{
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        self.as_ref().encode_to(dest);
    }

    fn size_hint(&self) -> usize {
        self.as_ref().size_hint()
    }
}

impl<T> Decodable for Cow<'_, T>
where
    T: ToOwned + ?Sized,
    T::Owned: Decodable,
{
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        T::Owned::decode(input).map(Cow::Owned)
    }
}
