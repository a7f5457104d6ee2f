//! Compact (variable-length) integer codec.
//!
//! Non-negative integers are encoded in one of four modes selected by magnitude. The
//! two low bits of the first byte name the mode:
//!
//! | mode | range            | layout                                               |
//! |------|------------------|------------------------------------------------------|
//! | `00` | `v < 2^6`        | 1 byte: `v << 2`                                     |
//! | `01` | `v < 2^14`       | 2 bytes LE: `(v << 2) \| 0b01`                       |
//! | `10` | `v < 2^30`       | 4 bytes LE: `(v << 2) \| 0b10`                       |
//! | `11` | `v >= 2^30`      | header `((n - 4) << 2) \| 0b11`, then `n` bytes LE  |
//!
//! where `n` is the minimal number of bytes holding `v`. The encoder always picks the
//! smallest mode. The decoder accepts any well-formed mode unless the cursor's
//! [`DecodeConfig::canonical_compact`](crate::DecodeConfig::canonical_compact) flag
//! asks for strict validation.
//!
//! The big-integer header has six bits for `n - 4`, so the wire format tops out at
//! 67 bytes. Each target type caps that further at its own width: decoding a value that
//! does not fit the target fails with [`DecodeError::IntegerTooLarge`].

use serde::Serialize;

use crate::codec::{Decodable, Encodable};
use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::sink::Output;
use crate::wide::{U256, U512, trim_le};

/// Largest big-integer payload the header can describe, in bytes.
pub const MAX_COMPACT_BYTES: usize = 63 + 4;

/// Smallest value encoded in two bytes.
const MIN_TWO_BYTE: u32 = 1 << 6;
/// Smallest value encoded in four bytes.
const MIN_FOUR_BYTE: u32 = 1 << 14;
/// Smallest value encoded in big-integer mode.
const MIN_BIG_INTEGER: u32 = 1 << 30;

/// Widest supported target, used to size scratch buffers.
const SCRATCH_BYTES: usize = U512::BYTES;

/// The four encoding modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompactMode {
    /// One byte, values below `2^6`.
    SingleByte,
    /// Two bytes, values below `2^14`.
    TwoByte,
    /// Four bytes, values below `2^30`.
    FourByte,
    /// Header byte followed by 4 to 67 value bytes.
    BigInteger,
}

impl CompactMode {
    /// Reads the mode from the low two bits of a header byte.
    pub fn from_header(header: u8) -> Self {
        match header & 0b11 {
            0b00 => Self::SingleByte,
            0b01 => Self::TwoByte,
            0b10 => Self::FourByte,
            _ => Self::BigInteger,
        }
    }

    /// Total encoded length implied by a header byte, header included.
    pub fn encoded_len(header: u8) -> usize {
        match Self::from_header(header) {
            Self::SingleByte => 1,
            Self::TwoByte => 2,
            Self::FourByte => 4,
            Self::BigInteger => 1 + usize::from(header >> 2) + 4,
        }
    }
}

/// Integer types that can be compact-encoded.
///
/// Implemented for `u8`, `u16`, `u32`, `u64`, `u128`, [`U256`] and [`U512`].
pub trait CompactInteger: Copy {
    /// Width of the type in bytes.
    const BYTES: usize;

    /// Writes the value as `BYTES` little-endian bytes into the front of `out`.
    fn write_le(&self, out: &mut [u8]);

    /// Builds a value from little-endian bytes, or `None` if it does not fit.
    fn from_le_slice(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_compact_integer {
    ($($t:ty),*) => {
        $(
            impl CompactInteger for $t {
                const BYTES: usize = std::mem::size_of::<$t>();

                fn write_le(&self, out: &mut [u8]) {
                    if let Some(slot) = out.get_mut(..Self::BYTES) {
                        slot.copy_from_slice(&self.to_le_bytes());
                    }
                }

                fn from_le_slice(bytes: &[u8]) -> Option<Self> {
                    let significant = trim_le(bytes);
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.get_mut(..significant.len())?.copy_from_slice(significant);
                    Some(<$t>::from_le_bytes(buf))
                }
            }
        )*
    };
}

impl_compact_integer!(u8, u16, u32, u64, u128);

macro_rules! impl_compact_wide {
    ($($t:ident),*) => {
        $(
            impl CompactInteger for $t {
                const BYTES: usize = $t::BYTES;

                fn write_le(&self, out: &mut [u8]) {
                    if let Some(slot) = out.get_mut(..Self::BYTES) {
                        slot.copy_from_slice(&self.to_le_bytes());
                    }
                }

                fn from_le_slice(bytes: &[u8]) -> Option<Self> {
                    $t::from_le_slice(bytes)
                }
            }
        )*
    };
}

impl_compact_wide!(U256, U512);

/// Wrapper selecting the compact encoding for an integer.
///
/// ```rust
/// use scalecodec::{Compact, Encodable};
///
/// assert_eq!(Compact(63u32).encode(), [0xFC]);
/// assert_eq!(Compact(64u32).encode(), [0x01, 0x01]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Compact<T>(pub T);

impl<T> Compact<T> {
    /// Unwraps the integer.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Compact<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: CompactInteger> Encodable for Compact<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        let mut scratch = [0u8; SCRATCH_BYTES];
        self.0.write_le(&mut scratch);
        encode_le(scratch.get(..T::BYTES).unwrap_or_default(), dest);
    }

    fn size_hint(&self) -> usize {
        compact_len(&self.0)
    }
}

impl<T: CompactInteger> Decodable for Compact<T> {
    fn decode(input: &mut Cursor<'_>) -> Result<Self> {
        let raw = RawCompact::read(input)?;
        if input.config().canonical_compact {
            raw.ensure_canonical()?;
        }
        raw.into_value().map(Compact)
    }
}

/// Encoded size of `value` in compact form, without encoding it.
pub fn compact_len<T: CompactInteger>(value: &T) -> usize {
    let mut scratch = [0u8; SCRATCH_BYTES];
    value.write_le(&mut scratch);
    len_for_le(scratch.get(..T::BYTES).unwrap_or_default())
}

/// Writes a collection length prefix.
pub fn encode_length<O: Output + ?Sized>(len: usize, dest: &mut O) {
    Compact(len as u64).encode_to(dest);
}

/// Reads a collection length prefix and checks it against the configured cap.
pub fn decode_length(input: &mut Cursor<'_>) -> Result<usize> {
    let len = Compact::<u64>::decode(input)?.0;
    let max = input.config().max_collection_len;
    match usize::try_from(len) {
        Ok(n) if n <= max => Ok(n),
        _ => Err(DecodeError::LengthOverflow { len, max }),
    }
}

/// Packs the low 30 bits of a small value; `None` if it needs big-integer mode.
fn small_value(le: &[u8]) -> Option<u32> {
    if le.len() > 4 {
        return None;
    }
    let mut word = [0u8; 4];
    word.get_mut(..le.len())?.copy_from_slice(le);
    let v = u32::from_le_bytes(word);
    (v < MIN_BIG_INTEGER).then_some(v)
}

fn small_len(v: u32) -> usize {
    if v < MIN_TWO_BYTE {
        1
    } else if v < MIN_FOUR_BYTE {
        2
    } else {
        4
    }
}

fn len_for_le(le: &[u8]) -> usize {
    let significant = trim_le(le);
    match small_value(significant) {
        Some(v) => small_len(v),
        None => 1 + significant.len(),
    }
}

fn encode_le<O: Output + ?Sized>(le: &[u8], dest: &mut O) {
    let significant = trim_le(le);
    match small_value(significant) {
        Some(v) if v < MIN_TWO_BYTE => dest.push_byte((v as u8) << 2),
        Some(v) if v < MIN_FOUR_BYTE => dest.write(&(((v as u16) << 2) | 0b01).to_le_bytes()),
        Some(v) => dest.write(&((v << 2) | 0b10).to_le_bytes()),
        None => {
            // Values of 2^30 and above always need at least 4 bytes, so `n - 4` cannot
            // underflow; the widest target keeps it below 64.
            let n = significant.len();
            dest.push_byte((((n - 4) as u8) << 2) | 0b11);
            dest.write(significant);
        }
    }
}

/// A compact integer read off the wire but not yet narrowed to a target type.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawCompact<'a> {
    header: u8,
    payload: Payload<'a>,
}

#[derive(Debug, Clone, Copy)]
enum Payload<'a> {
    Small(u32),
    Big(&'a [u8]),
}

impl<'a> RawCompact<'a> {
    /// Consumes one compact integer. Fails without consuming if it is truncated.
    pub(crate) fn read(input: &mut Cursor<'a>) -> Result<Self> {
        let header = input.peek_byte().ok_or(DecodeError::OutOfData {
            needed: 1,
            remaining: 0,
        })?;
        input.ensure(CompactMode::encoded_len(header))?;

        let payload = match CompactMode::from_header(header) {
            CompactMode::SingleByte => {
                input.read_byte()?;
                Payload::Small(u32::from(header >> 2))
            }
            CompactMode::TwoByte => {
                let word = u16::from_le_bytes(input.read_array()?);
                Payload::Small(u32::from(word >> 2))
            }
            CompactMode::FourByte => {
                let word = u32::from_le_bytes(input.read_array()?);
                Payload::Small(word >> 2)
            }
            CompactMode::BigInteger => {
                input.read_byte()?;
                let n = usize::from(header >> 2) + 4;
                Payload::Big(input.read_bytes(n)?)
            }
        };
        Ok(Self { header, payload })
    }

    pub(crate) fn mode(&self) -> CompactMode {
        CompactMode::from_header(self.header)
    }

    pub(crate) fn header(&self) -> u8 {
        self.header
    }

    /// Bytes this value occupied on the wire.
    pub(crate) fn encoded_len(&self) -> usize {
        CompactMode::encoded_len(self.header)
    }

    /// Bytes the minimal mode needs for the same value.
    pub(crate) fn minimal_len(&self) -> usize {
        match self.payload {
            Payload::Small(v) => small_len(v),
            Payload::Big(bytes) => len_for_le(bytes),
        }
    }

    /// Significant bytes of the value.
    pub(crate) fn significant_len(&self) -> usize {
        match self.payload {
            Payload::Small(v) => trim_le(&v.to_le_bytes()).len(),
            Payload::Big(bytes) => trim_le(bytes).len(),
        }
    }

    /// The value's significant bytes, least significant first.
    pub(crate) fn significant_bytes(&self) -> Vec<u8> {
        match self.payload {
            Payload::Small(v) => trim_le(&v.to_le_bytes()).to_vec(),
            Payload::Big(bytes) => trim_le(bytes).to_vec(),
        }
    }

    pub(crate) fn is_canonical(&self) -> bool {
        self.encoded_len() == self.minimal_len()
    }

    pub(crate) fn ensure_canonical(&self) -> Result<()> {
        if self.is_canonical() {
            return Ok(());
        }
        Err(DecodeError::NonCanonicalCompact {
            encoded_len: self.encoded_len(),
            minimal_len: self.minimal_len(),
        })
    }

    /// Narrows to `T`, failing with `IntegerTooLarge` if the value does not fit.
    pub(crate) fn into_value<T: CompactInteger>(self) -> Result<T> {
        let value = match self.payload {
            Payload::Small(v) => T::from_le_slice(&v.to_le_bytes()),
            Payload::Big(bytes) => T::from_le_slice(bytes),
        };
        value.ok_or(DecodeError::IntegerTooLarge {
            bytes: self.significant_len(),
            max_bytes: T::BYTES,
        })
    }
}
