//! Centralized error handling for the codec.
//!
//! Encoding is total: every value constructible in the type system has an encoding, so
//! no encode path returns an error. Decoding is partial, and every way it can fail is a
//! variant of [`DecodeError`].
//!
//! ## Propagation
//!
//! Composite, collection and variant decoders propagate the first nested failure
//! unchanged. A caller matching on [`DecodeError::OutOfData`] after decoding a
//! `Vec<(u32, Option<bool>)>` sees exactly the error the innermost decoder raised, not a
//! wrapper around it. No partially decoded value is ever returned.
//!
//! Malformed input is a permanent condition. Nothing inside the engine retries.
//!
//! ## Usage
//!
//! ```rust
//! use scalecodec::{DecodeError, Scale};
//!
//! match Scale::decode::<u32>(&[0x01, 0x02, 0x03]) {
//!     Err(DecodeError::OutOfData { needed, remaining }) => {
//!         assert_eq!((needed, remaining), (4, 3));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

/// A specialized `Result` type for decode operations.
///
/// ```rust
/// use scalecodec::Result;
///
/// fn my_function() -> Result<u8> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Every failure a decoder can report.
///
/// The type is `Clone + PartialEq + Eq` so tests and callers can compare errors
/// directly, and carries the offending byte or counts where one exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Fewer bytes remain than a fixed-width or compact-mode read requires.
    #[error("not enough data: needed {needed} byte(s), {remaining} remaining")]
    OutOfData {
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the input at the time of the read.
        remaining: usize,
    },

    /// A boolean byte outside `{0x00, 0x01}`.
    #[error("invalid boolean byte 0x{0:02x}")]
    InvalidBoolean(u8),

    /// An option tag outside the declared tag set.
    ///
    /// For `Option<T>` the valid tags are `{0x00, 0x01}`; for
    /// [`OptionBool`](crate::OptionBool) they are `{0x00, 0x01, 0x02}`.
    #[error("invalid option tag 0x{0:02x}")]
    InvalidOptionTag(u8),

    /// A variant tag at or beyond the declared variant count.
    #[error("variant index {index} out of range for type with {count} variant(s)")]
    InvalidVariantIndex {
        /// The tag byte read from the input.
        index: u8,
        /// Number of variants the target type declares.
        count: usize,
    },

    /// A decoded collection length above the configured maximum.
    ///
    /// See [`DecodeConfig::max_collection_len`](crate::DecodeConfig::max_collection_len).
    #[error("collection length {len} exceeds configured maximum {max}")]
    LengthOverflow {
        /// The length prefix read from the input.
        len: u64,
        /// The configured cap.
        max: usize,
    },

    /// A compact integer wider than the target type can hold.
    #[error("compact integer of {bytes} byte(s) exceeds supported width of {max_bytes} byte(s)")]
    IntegerTooLarge {
        /// Significant bytes of the encoded value.
        bytes: usize,
        /// Byte width of the target type.
        max_bytes: usize,
    },

    /// Strict mode rejected a compact integer not encoded in its minimal mode.
    ///
    /// Only raised when [`DecodeConfig::canonical_compact`](crate::DecodeConfig::canonical_compact)
    /// is set.
    #[error("non-canonical compact encoding: {encoded_len} byte(s) used where {minimal_len} suffice")]
    NonCanonicalCompact {
        /// Bytes the input used, header included.
        encoded_len: usize,
        /// Bytes the minimal mode needs.
        minimal_len: usize,
    },

    /// The trailing-byte policy rejected unconsumed input after a top-level decode.
    #[error("{remaining} trailing byte(s) left after decoding")]
    TrailingBytes {
        /// Bytes left unconsumed.
        remaining: usize,
    },

    /// A fieldless enum's discriminant is not one of its declared values.
    #[error("discriminant does not belong to enum `{type_name}`")]
    InvalidEnumValue {
        /// Name of the enum type.
        type_name: &'static str,
    },

    /// A string payload is not valid UTF-8.
    #[error("invalid UTF-8 in string payload (valid up to byte {valid_up_to})")]
    InvalidUtf8 {
        /// Length of the valid prefix.
        valid_up_to: usize,
    },
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

impl From<std::string::FromUtf8Error> for DecodeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        err.utf8_error().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = DecodeError::InvalidVariantIndex { index: 0xFF, count: 2 };
        assert_eq!(
            err.to_string(),
            "variant index 255 out of range for type with 2 variant(s)"
        );
        assert_eq!(
            DecodeError::InvalidBoolean(0x02).to_string(),
            "invalid boolean byte 0x02"
        );
    }

    #[test]
    fn utf8_errors_convert() {
        let bytes = vec![b'o', b'k', 0xFF];
        let err: DecodeError = String::from_utf8(bytes).unwrap_err().into();
        assert_eq!(err, DecodeError::InvalidUtf8 { valid_up_to: 2 });
    }
}
