//! In-place append to an already encoded sequence.
//!
//! Encoded `Vec<T>` values are a compact length followed by the elements, so one more
//! element can be appended without decoding the existing ones: bump the prefix, then
//! write the element bytes at the end. The prefix may change width when the count
//! crosses a mode boundary (63 -> 64, 16383 -> 16384, ...), in which case the body is
//! shifted.

use tracing::debug;

use crate::codec::Encodable;
use crate::compact::{decode_length, encode_length};
use crate::config::DecodeConfig;
use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};

/// Appends one pre-encoded element to the encoded sequence in `encoded`.
///
/// An empty buffer is treated as "no sequence yet" and becomes a one-element sequence.
/// Otherwise `encoded` must start with a compact length prefix; the element bytes are
/// taken as-is and not validated against the existing elements.
///
/// ```rust
/// use scalecodec::{Encodable, append_or_new_vec};
///
/// let mut encoded = vec![1u32, 2].encode();
/// append_or_new_vec(&mut encoded, &3u32.encode())?;
/// assert_eq!(encoded, vec![1u32, 2, 3].encode());
/// # Ok::<(), scalecodec::DecodeError>(())
/// ```
pub fn append_or_new_vec(encoded: &mut Vec<u8>, item: &[u8]) -> Result<()> {
    if encoded.is_empty() {
        encode_length(1, encoded);
        encoded.extend_from_slice(item);
        debug!(item_len = item.len(), "started new encoded sequence");
        return Ok(());
    }

    let (len, prefix_len) = {
        // The existing count was produced by an encoder, not read off the wire.
        let config = DecodeConfig::new().with_max_collection_len(usize::MAX);
        let mut cursor = Cursor::with_config(encoded, config);
        let len = decode_length(&mut cursor)?;
        (len, cursor.position())
    };
    let new_len = len.checked_add(1).ok_or(DecodeError::LengthOverflow {
        len: len as u64,
        max: usize::MAX,
    })?;

    let mut prefix = Vec::with_capacity(prefix_len);
    encode_length(new_len, &mut prefix);
    if prefix.len() != prefix_len {
        debug!(
            old_prefix = prefix_len,
            new_prefix = prefix.len(),
            "length prefix changed width"
        );
    }
    encoded.splice(..prefix_len, prefix).for_each(drop);
    encoded.extend_from_slice(item);
    debug!(len = new_len, item_len = item.len(), "appended to encoded sequence");
    Ok(())
}

/// Encodes `item` and appends it with [`append_or_new_vec`].
pub fn append_encodable<T: Encodable + ?Sized>(encoded: &mut Vec<u8>, item: &T) -> Result<()> {
    append_or_new_vec(encoded, &item.encode())
}
