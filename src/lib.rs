//! # scalecodec
//!
//! A compact, non-self-describing binary codec for Rust values, wire compatible with
//! SCALE ("Simple Concatenated Aggregate Little-Endian").
//!
//! ## Overview
//!
//! The format carries no type information, field names or schema. Both sides must
//! agree on the type being exchanged; the bytes are then the shortest deterministic
//! rendering of the value:
//!
//! *   **Fixed-width integers** are little-endian two's complement of their declared
//!     width, from 8 up to 512 bits ([`U256`], [`U512`], [`I256`], [`I512`]).
//! *   **Compact integers** ([`Compact`]) use a 1, 2, 4 or 5-67 byte form chosen by
//!     magnitude. Every collection length is written this way.
//! *   **Composites** (tuples, arrays, structs) are the concatenation of their fields.
//! *   **Variants** (`Option`, `Result`, enums) are one tag byte plus the payload.
//! *   **Collections** are a compact length followed by the elements.
//!
//! ## Architecture
//!
//! Every codec is an implementation of the [`Encodable`] / [`Decodable`] pair. Encoders
//! append to an [`Output`] sink; decoders read from a [`Cursor`] that borrows the input
//! and fails with [`DecodeError::OutOfData`] instead of reading past the end. Because
//! composite and collection codecs are generic over the two traits, arbitrarily nested
//! types work with static dispatch and no registry.
//!
//! Decoding is hardened against hostile input by a [`DecodeConfig`]: collection lengths
//! are capped before any allocation, and strict mode rejects non-minimal compact
//! integers so that every value has exactly one accepted encoding.
//!
//! ## Usage Patterns
//!
//! ### Basic Round Trip
//!
//! ```rust
//! use scalecodec::{Compact, Decodable, Encodable, Scale};
//!
//! #[derive(Debug, PartialEq, Encodable, Decodable)]
//! struct Transfer {
//!     #[scale(compact)]
//!     amount: u128,
//!     memo: Option<String>,
//! }
//!
//! let transfer = Transfer { amount: 1_000, memo: None };
//! let bytes = Scale::encode(&transfer);
//! assert_eq!(bytes, [0xA1, 0x0F, 0x00]);
//! assert_eq!(Scale::decode::<Transfer>(&bytes)?, transfer);
//! assert_eq!(Scale::encode(&Compact(1_000u32)), [0xA1, 0x0F]);
//! # Ok::<(), scalecodec::DecodeError>(())
//! ```
//!
//! ### Hardened Decoding
//!
//! ```rust
//! use scalecodec::{DecodeConfig, DecodeError, Scale};
//!
//! let strict = DecodeConfig::new().canonical(true).with_max_collection_len(1024);
//! // The value 1 padded into two-byte mode.
//! let padded = [0x05, 0x00];
//! assert!(matches!(
//!     Scale::decode_with_config::<scalecodec::Compact<u32>>(&padded, strict),
//!     Err(DecodeError::NonCanonicalCompact { .. })
//! ));
//! ```
//!
//! ### Discriminant Enums
//!
//! A fieldless enum can put its discriminant on the wire instead of a tag. Every
//! discriminant must fit the named type; one that would be truncated is a compile error.
//!
//! ```compile_fail
//! use scalecodec::{Decodable, Encodable};
//!
//! #[derive(Encodable, Decodable)]
//! #[scale(discriminant = "u8")]
//! enum Wide {
//!     Low = 0,
//!     High = 256,
//! }
//! ```
//!
//! ### Safety and Error Handling
//!
//! * **No Unsafe:** the crate is `#![deny(unsafe_code)]`.
//! * **No Panics:** no `unwrap()` or `panic!()` in the library (enforced by clippy lints).
//!   Malformed input is always reported through [`DecodeError`].
//! * **Bounded Work:** a decode never allocates more than the configured caps and the
//!   remaining input allow.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// Lets the derive's `::scalecodec::` paths resolve inside this crate's own tests.
extern crate self as scalecodec;

// --- PUBLIC API MODULES ---
pub mod api;
pub mod codec;
pub mod compact;
pub mod config;
pub mod cursor;
pub mod error;
pub mod inspector;
pub mod sink;
pub mod variant;
pub mod wide;

// --- CODEC IMPLEMENTATION MODULES ---
mod append;
mod bitvec;
mod collections;
mod composite;
mod int;
mod primitives;

// --- RE-EXPORTS ---

pub use api::Scale;
pub use append::{append_encodable, append_or_new_vec};
pub use bitvec::BitVec;
pub use codec::{Codec, Decodable, Encodable};
pub use compact::{Compact, CompactInteger, CompactMode, compact_len};
pub use config::DecodeConfig;
pub use cursor::Cursor;
pub use error::{DecodeError, Result};
pub use inspector::{CompactInspector, CompactReport};
pub use primitives::OptionBool;
pub use sink::{Output, SizeCounter};
pub use variant::Variants;
pub use wide::{I256, I512, U256, U512};

// Re-export the derive macros so they are accessible as `scalecodec::Encodable`.
pub use scalecodec_derive::{Decodable, Encodable};

/// Constants used throughout the library.
pub mod constants {
    /// Default cap on the element count a decoded length prefix may declare.
    pub const DEFAULT_MAX_COLLECTION_LEN: usize = 1 << 24;
}
