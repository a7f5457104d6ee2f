//! The `Scale` facade: one-call encode and decode with the trailing-byte policy applied.

use std::io::Write;

use tracing::{debug, trace};

use crate::codec::{Decodable, Encodable};
use crate::config::DecodeConfig;
use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::sink::Output;

/// The main entry point for encoding and decoding.
///
/// Every call is independent: there is no shared state between calls, so `Scale` can
/// be used from any number of threads at once.
#[derive(Debug)]
pub struct Scale;

impl Scale {
    /// Encodes `value` into a fresh buffer.
    pub fn encode<T: Encodable + ?Sized>(value: &T) -> Vec<u8> {
        value.encode()
    }

    /// Appends the encoding of `value` to `dest`.
    pub fn encode_to<T, O>(value: &T, dest: &mut O)
    where
        T: Encodable + ?Sized,
        O: Output + ?Sized,
    {
        value.encode_to(dest);
    }

    /// Encodes `value` and writes it to `writer` in one `write_all`.
    ///
    /// # Arguments
    /// * `writer`: Any byte destination, typically a file or socket.
    /// * `value`: The value to encode.
    pub fn encode_to_writer<T, W>(writer: &mut W, value: &T) -> std::io::Result<()>
    where
        T: Encodable + ?Sized,
        W: Write + ?Sized,
    {
        let bytes = value.encode();
        trace!(len = bytes.len(), "writing encoded value");
        writer.write_all(&bytes)
    }

    /// Exact encoded length of `value`.
    pub fn encoded_size<T: Encodable + ?Sized>(value: &T) -> usize {
        value.encoded_size()
    }

    /// Decodes a `T` that must span all of `bytes`, with the default configuration.
    pub fn decode<T: Decodable>(bytes: &[u8]) -> Result<T> {
        Self::decode_with_config(bytes, DecodeConfig::default())
    }

    /// Decodes a `T` under an explicit configuration.
    ///
    /// Unless `config.allow_trailing_bytes` is set, input left over after the value
    /// fails with [`DecodeError::TrailingBytes`].
    pub fn decode_with_config<T: Decodable>(bytes: &[u8], config: DecodeConfig) -> Result<T> {
        let (value, consumed) = Self::decode_prefix_with_config(bytes, config)?;
        let remaining = bytes.len() - consumed;
        if remaining > 0 && !config.allow_trailing_bytes {
            debug!(
                type_name = std::any::type_name::<T>(),
                remaining, "rejecting trailing bytes"
            );
            return Err(DecodeError::TrailingBytes { remaining });
        }
        Ok(value)
    }

    /// Decodes a `T` from the front of `bytes`, returning it with the bytes consumed.
    ///
    /// Anything after the value is left alone, so concatenated encodings can be
    /// read one after another.
    pub fn decode_prefix<T: Decodable>(bytes: &[u8]) -> Result<(T, usize)> {
        Self::decode_prefix_with_config(bytes, DecodeConfig::default())
    }

    /// [`Scale::decode_prefix`] under an explicit configuration.
    pub fn decode_prefix_with_config<T: Decodable>(
        bytes: &[u8],
        config: DecodeConfig,
    ) -> Result<(T, usize)> {
        let mut cursor = Cursor::with_config(bytes, config);
        match T::decode(&mut cursor) {
            Ok(value) => Ok((value, cursor.position())),
            Err(err) => {
                debug!(
                    type_name = std::any::type_name::<T>(),
                    position = cursor.position(),
                    error = %err,
                    "decode failed"
                );
                Err(err)
            }
        }
    }
}
