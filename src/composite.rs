//! Product types: tuples and fixed-size arrays.
//!
//! A composite is the concatenation of its fields' encodings in declaration order, with
//! no length, tag or padding. Arrays `[T; N]` are the `N` element encodings back to back;
//! `N` is part of the type, so no prefix is written. Structs get the same treatment
//! through the derive macro.

use crate::codec::{Decodable, Encodable};
use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::sink::Output;

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: Encodable),+> Encodable for ($($name,)+) {
            #[allow(non_snake_case)]
            fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
                let ($($name,)+) = self;
                $($name.encode_to(dest);)+
            }

            #[allow(non_snake_case)]
            fn size_hint(&self) -> usize {
                let ($($name,)+) = self;
                0 $(+ $name.size_hint())+
            }
        }

        impl<$($name: Decodable),+> Decodable for ($($name,)+) {
            fn decode(input: &mut Cursor<'_>) -> Result<Self> {
                Ok(($($name::decode(input)?,)+))
            }
        }
    };
}

impl_tuple!(A);
impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);
impl_tuple!(A, B, C, D, E);
impl_tuple!(A, B, C, D, E, F);
impl_tuple!(A, B, C, D, E, F, G);
impl_tuple!(A, B, C, D, E, F, G, H);
impl_tuple!(A, B, C, D, E, F, G, H, I);
impl_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

impl<T: Encodable, const N: usize> Encodable for [T; N] {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        for item in self {
            item.encode_to(dest);
        }
    }

    fn size_hint(&self) -> usize {
        self.iter().map(Encodable::size_hint).sum()
    }
}

impl<T: Decodable, const N: usize> Decodable for [T; N] {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode(input)?);
        }
        <[T; N]>::try_from(items).map_err(|partial| DecodeError::OutOfData {
            needed: N,
            remaining: partial.len(),
        })
    }
}
