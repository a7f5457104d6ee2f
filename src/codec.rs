//! The `Encodable` / `Decodable` capability.
//!
//! Every codec in the crate is an implementation of these two traits. Composite,
//! collection and variant codecs are generic over them and call them on their
//! constituents without knowing the concrete type, which is what lets arbitrarily
//! nested types (vectors of structs of enums of compact integers, ...) work without
//! any registry. A new leaf type only has to supply an encode/decode pair, either by
//! hand or through `#[derive(Encodable, Decodable)]`.
//!
//! Dispatch is static: the traits use generic methods, so the whole encode of a
//! nested value monomorphizes into straight-line code.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::sink::{Output, SizeCounter};

/// A type with a defined mapping to a byte sequence.
///
/// Implementations must be deterministic: equal values produce equal bytes.
pub trait Encodable {
    /// Appends the encoding of `self` to `dest`.
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O);

    /// A cheap guess at the encoded length, used to preallocate.
    ///
    /// Returning `0` is always correct.
    fn size_hint(&self) -> usize {
        0
    }

    /// Encodes `self` into a fresh buffer.
    fn encode(&self) -> Vec<u8> {
        let mut dest = Vec::with_capacity(self.size_hint());
        self.encode_to(&mut dest);
        dest
    }

    /// Exact encoded length, computed without materializing the bytes.
    fn encoded_size(&self) -> usize {
        let mut counter = SizeCounter::new();
        self.encode_to(&mut counter);
        counter.count()
    }
}

/// A type that can be reconstructed from the bytes its [`Encodable`] impl produces.
pub trait Decodable: Sized {
    /// Reads one value from `input`, consuming exactly its encoding.
    fn decode(input: &mut Cursor<'_>) -> Result<Self>;
}

/// Shorthand for types implementing both halves of the capability.
pub trait Codec: Encodable + Decodable {}

impl<T: Encodable + Decodable> Codec for T {}
