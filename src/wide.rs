//! Fixed-capacity wide integers.
//!
//! [`U256`] and [`U512`] are unsigned integers stored as little-endian `u64` limbs.
//! [`I256`] and [`I512`] hold the two's-complement bit pattern of the same width. They
//! are leaf types: the fixed-width codec writes them as 32 or 64 little-endian bytes,
//! and the unsigned ones can also be compact-encoded through
//! [`Compact`](crate::Compact).
//!
//! The arithmetic surface is intentionally small. It covers what encoding and tests
//! need (conversions, comparison, checked add/sub, bit length, formatting), not a
//! general bignum library.

use std::cmp::Ordering;
use std::fmt;

use crate::codec::{Decodable, Encodable};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::sink::Output;

macro_rules! wide_uint {
    ($(#[$meta:meta])* $name:ident, $limbs:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name([u64; $limbs]);

        impl $name {
            /// Number of 64-bit limbs.
            pub const LIMBS: usize = $limbs;
            /// Width in bits.
            pub const BITS: u32 = $limbs * 64;
            /// Width in bytes.
            pub const BYTES: usize = $limbs * 8;
            /// Zero.
            pub const ZERO: Self = Self([0; $limbs]);
            /// One.
            pub const ONE: Self = {
                let mut limbs = [0u64; $limbs];
                limbs[0] = 1;
                Self(limbs)
            };
            /// Largest representable value.
            pub const MAX: Self = Self([u64::MAX; $limbs]);

            /// Builds a value from little-endian limbs.
            pub const fn from_limbs(limbs: [u64; $limbs]) -> Self {
                Self(limbs)
            }

            /// Little-endian limbs.
            pub const fn as_limbs(&self) -> &[u64; $limbs] {
                &self.0
            }

            /// Builds a value from its little-endian byte representation.
            pub fn from_le_bytes(bytes: [u8; $limbs * 8]) -> Self {
                let mut limbs = [0u64; $limbs];
                for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
                    let mut word = [0u8; 8];
                    word.copy_from_slice(chunk);
                    *limb = u64::from_le_bytes(word);
                }
                Self(limbs)
            }

            /// Little-endian byte representation.
            pub fn to_le_bytes(&self) -> [u8; $limbs * 8] {
                let mut out = [0u8; $limbs * 8];
                for (chunk, limb) in out.chunks_exact_mut(8).zip(self.0.iter()) {
                    chunk.copy_from_slice(&limb.to_le_bytes());
                }
                out
            }

            /// Builds a value from a little-endian slice of any length.
            ///
            /// Returns `None` if the slice has significant (non-zero) bytes beyond
            /// this type's width.
            pub fn from_le_slice(bytes: &[u8]) -> Option<Self> {
                let significant = trim_le(bytes);
                if significant.len() > Self::BYTES {
                    return None;
                }
                let mut buf = [0u8; $limbs * 8];
                buf.get_mut(..significant.len())?.copy_from_slice(significant);
                Some(Self::from_le_bytes(buf))
            }

            /// True if the value is zero.
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|&limb| limb == 0)
            }

            /// Position of the highest set bit plus one; zero for zero.
            pub fn bits(&self) -> u32 {
                for (i, &limb) in self.0.iter().enumerate().rev() {
                    if limb != 0 {
                        return i as u32 * 64 + (64 - limb.leading_zeros());
                    }
                }
                0
            }

            /// Minimal number of bytes holding the value; zero for zero.
            pub fn byte_len(&self) -> usize {
                (self.bits() as usize).div_ceil(8)
            }

            /// `2^exp`, or `None` if it does not fit.
            pub fn power_of_two(exp: u32) -> Option<Self> {
                if exp >= Self::BITS {
                    return None;
                }
                let mut limbs = [0u64; $limbs];
                limbs[(exp / 64) as usize] = 1u64 << (exp % 64);
                Some(Self(limbs))
            }

            /// The lowest 64 bits.
            pub fn low_u64(&self) -> u64 {
                self.0[0]
            }

            /// Narrows to `u128` if the value fits.
            pub fn try_to_u128(&self) -> Option<u128> {
                if self.0[2..].iter().any(|&limb| limb != 0) {
                    return None;
                }
                Some(u128::from(self.0[0]) | (u128::from(self.0[1]) << 64))
            }

            /// Addition returning the wrapped sum and whether it overflowed.
            pub fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                let mut out = [0u64; $limbs];
                let mut carry = false;
                for (i, slot) in out.iter_mut().enumerate() {
                    let (sum, c1) = self.0[i].overflowing_add(rhs.0[i]);
                    let (sum, c2) = sum.overflowing_add(u64::from(carry));
                    *slot = sum;
                    carry = c1 || c2;
                }
                (Self(out), carry)
            }

            /// Subtraction returning the wrapped difference and whether it borrowed.
            pub fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
                let mut out = [0u64; $limbs];
                let mut borrow = false;
                for (i, slot) in out.iter_mut().enumerate() {
                    let (diff, b1) = self.0[i].overflowing_sub(rhs.0[i]);
                    let (diff, b2) = diff.overflowing_sub(u64::from(borrow));
                    *slot = diff;
                    borrow = b1 || b2;
                }
                (Self(out), borrow)
            }

            /// Checked addition.
            pub fn checked_add(self, rhs: Self) -> Option<Self> {
                match self.overflowing_add(rhs) {
                    (sum, false) => Some(sum),
                    (_, true) => None,
                }
            }

            /// Checked subtraction.
            pub fn checked_sub(self, rhs: Self) -> Option<Self> {
                match self.overflowing_sub(rhs) {
                    (diff, false) => Some(diff),
                    (_, true) => None,
                }
            }

            /// Wrapping addition.
            pub fn wrapping_add(self, rhs: Self) -> Self {
                self.overflowing_add(rhs).0
            }

            /// Bitwise complement.
            pub fn complement(self) -> Self {
                let mut limbs = self.0;
                for limb in &mut limbs {
                    *limb = !*limb;
                }
                Self(limbs)
            }

            /// Divides by a non-zero `u64`, returning quotient and remainder.
            fn div_rem_u64(self, divisor: u64) -> (Self, u64) {
                let divisor = u128::from(divisor);
                let mut quotient = [0u64; $limbs];
                let mut rem: u128 = 0;
                for i in (0..$limbs).rev() {
                    let acc = (rem << 64) | u128::from(self.0[i]);
                    quotient[i] = (acc / divisor) as u64;
                    rem = acc % divisor;
                }
                (Self(quotient), rem as u64)
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.iter().rev().cmp(other.0.iter().rev())
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl From<u128> for $name {
            fn from(v: u128) -> Self {
                let mut limbs = [0u64; $limbs];
                limbs[0] = v as u64;
                limbs[1] = (v >> 64) as u64;
                Self(limbs)
            }
        }

        wide_uint!(@from_small $name, u8, u16, u32, u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // 10^19 is the largest power of ten below 2^64.
                const CHUNK: u64 = 10_000_000_000_000_000_000;
                if self.is_zero() {
                    return f.pad_integral(true, "", "0");
                }
                let mut parts = Vec::new();
                let mut rest = *self;
                while !rest.is_zero() {
                    let (q, r) = rest.div_rem_u64(CHUNK);
                    parts.push(r);
                    rest = q;
                }
                let mut digits = String::new();
                for (i, part) in parts.iter().rev().enumerate() {
                    if i == 0 {
                        digits.push_str(&part.to_string());
                    } else {
                        digits.push_str(&format!("{part:019}"));
                    }
                }
                f.pad_integral(true, "", &digits)
            }
        }

        impl fmt::LowerHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut digits = String::new();
                for &limb in self.0.iter().rev() {
                    if digits.is_empty() {
                        if limb != 0 {
                            digits.push_str(&format!("{limb:x}"));
                        }
                    } else {
                        digits.push_str(&format!("{limb:016x}"));
                    }
                }
                if digits.is_empty() {
                    digits.push('0');
                }
                f.pad_integral(true, "0x", &digits)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:#x})", stringify!($name), self)
            }
        }

        impl Encodable for $name {
            fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
                dest.write(&self.to_le_bytes());
            }

            fn size_hint(&self) -> usize {
                Self::BYTES
            }
        }

        impl Decodable for $name {
            fn decode(input: &mut Cursor<'_>) -> Result<Self> {
                Ok(Self::from_le_bytes(input.read_array()?))
            }
        }
    };

    (@from_small $name:ident, $($t:ty),*) => {
        $(
            impl From<$t> for $name {
                fn from(v: $t) -> Self {
                    Self::from(u128::from(v))
                }
            }
        )*
    };
}

macro_rules! wide_int {
    ($(#[$meta:meta])* $name:ident, $unsigned:ident, $limbs:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name($unsigned);

        impl $name {
            /// Width in bits.
            pub const BITS: u32 = $unsigned::BITS;
            /// Width in bytes.
            pub const BYTES: usize = $unsigned::BYTES;
            /// Zero.
            pub const ZERO: Self = Self($unsigned::ZERO);
            /// One.
            pub const ONE: Self = Self($unsigned::ONE);
            /// Minus one (all bits set).
            pub const MINUS_ONE: Self = Self($unsigned::MAX);
            /// Smallest representable value (only the sign bit set).
            pub const MIN: Self = {
                let mut limbs = [0u64; $limbs];
                limbs[$limbs - 1] = 1u64 << 63;
                Self($unsigned::from_limbs(limbs))
            };
            /// Largest representable value.
            pub const MAX: Self = {
                let mut limbs = [u64::MAX; $limbs];
                limbs[$limbs - 1] = u64::MAX >> 1;
                Self($unsigned::from_limbs(limbs))
            };

            /// Reinterprets a two's-complement bit pattern.
            pub const fn from_bits(bits: $unsigned) -> Self {
                Self(bits)
            }

            /// The underlying two's-complement bit pattern.
            pub const fn to_bits(self) -> $unsigned {
                self.0
            }

            /// Builds a value from its little-endian two's-complement bytes.
            pub fn from_le_bytes(bytes: [u8; $limbs * 8]) -> Self {
                Self($unsigned::from_le_bytes(bytes))
            }

            /// Little-endian two's-complement bytes.
            pub fn to_le_bytes(&self) -> [u8; $limbs * 8] {
                self.0.to_le_bytes()
            }

            /// True if the sign bit is set.
            pub fn is_negative(&self) -> bool {
                self.0.as_limbs()[$limbs - 1] >> 63 == 1
            }

            /// Two's-complement negation, wrapping at `MIN`.
            pub fn wrapping_neg(self) -> Self {
                Self(self.0.complement().wrapping_add($unsigned::ONE))
            }

            /// Magnitude as an unsigned value.
            pub fn unsigned_abs(self) -> $unsigned {
                if self.is_negative() {
                    self.wrapping_neg().0
                } else {
                    self.0
                }
            }

            /// Narrows to `i128` if the value fits.
            pub fn try_to_i128(&self) -> Option<i128> {
                let limbs = self.0.as_limbs();
                let fill = if self.is_negative() { u64::MAX } else { 0 };
                if limbs[2..].iter().any(|&limb| limb != fill) {
                    return None;
                }
                let v = (u128::from(limbs[0]) | (u128::from(limbs[1]) << 64)) as i128;
                // Bit 127 must agree with the discarded sign fill.
                if (v < 0) != self.is_negative() {
                    return None;
                }
                Some(v)
            }
        }

        impl From<i128> for $name {
            fn from(v: i128) -> Self {
                let fill = if v < 0 { u64::MAX } else { 0 };
                let mut limbs = [fill; $limbs];
                limbs[0] = v as u64;
                limbs[1] = ((v as u128) >> 64) as u64;
                Self($unsigned::from_limbs(limbs))
            }
        }

        wide_int!(@from_small $name, i8, i16, i32, i64);

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                match (self.is_negative(), other.is_negative()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => self.0.cmp(&other.0),
                }
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let magnitude = self.unsigned_abs().to_string();
                f.pad_integral(!self.is_negative(), "", &magnitude)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl Encodable for $name {
            fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
                self.0.encode_to(dest);
            }

            fn size_hint(&self) -> usize {
                Self::BYTES
            }
        }

        impl Decodable for $name {
            fn decode(input: &mut Cursor<'_>) -> Result<Self> {
                Ok(Self($unsigned::decode(input)?))
            }
        }
    };

    (@from_small $name:ident, $($t:ty),*) => {
        $(
            impl From<$t> for $name {
                fn from(v: $t) -> Self {
                    Self::from(i128::from(v))
                }
            }
        )*
    };
}

wide_uint!(
    /// 256-bit unsigned integer.
    U256,
    4
);
wide_uint!(
    /// 512-bit unsigned integer.
    U512,
    8
);
wide_int!(
    /// 256-bit signed integer in two's complement.
    I256,
    U256,
    4
);
wide_int!(
    /// 512-bit signed integer in two's complement.
    I512,
    U512,
    8
);

impl From<U256> for U512 {
    fn from(v: U256) -> Self {
        let mut limbs = [0u64; 8];
        limbs[..4].copy_from_slice(v.as_limbs());
        Self::from_limbs(limbs)
    }
}

/// Strips high-order zero bytes from a little-endian slice.
pub(crate) fn trim_le(bytes: &[u8]) -> &[u8] {
    let len = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip_and_layout() {
        let v = U256::from(0x0102u16);
        let bytes = v.to_le_bytes();
        assert_eq!(&bytes[..3], &[0x02, 0x01, 0x00]);
        assert_eq!(U256::from_le_bytes(bytes), v);
        assert_eq!(v.encode().len(), 32);
        assert_eq!(U512::MAX.encode(), vec![0xFF; 64]);
    }

    #[test]
    fn bit_and_byte_length() {
        assert_eq!(U256::ZERO.bits(), 0);
        assert_eq!(U256::ZERO.byte_len(), 0);
        assert_eq!(U256::from(1u8).bits(), 1);
        assert_eq!(U256::from(256u16).byte_len(), 2);
        assert_eq!(U256::MAX.bits(), 256);
        assert_eq!(U512::power_of_two(300).map(|v| v.bits()), Some(301));
        assert_eq!(U256::power_of_two(256), None);
    }

    #[test]
    fn from_le_slice_rejects_overwide() {
        let mut long = vec![0u8; 40];
        assert_eq!(U256::from_le_slice(&long), Some(U256::ZERO));
        long[33] = 1;
        assert_eq!(U256::from_le_slice(&long), None);
        assert!(U512::from_le_slice(&long).is_some());
    }

    #[test]
    fn ordering_follows_magnitude() {
        let small = U256::from(u128::MAX);
        let big = U256::power_of_two(128).unwrap();
        assert!(small < big);
        assert_eq!(small.checked_add(U256::ONE), Some(big));
        assert_eq!(U256::MAX.checked_add(U256::ONE), None);
        assert_eq!(U256::ZERO.checked_sub(U256::ONE), None);
    }

    #[test]
    fn narrowing() {
        assert_eq!(U256::from(7u8).try_to_u128(), Some(7));
        assert_eq!(U256::power_of_two(128).unwrap().try_to_u128(), None);
        assert_eq!(U512::from(u64::MAX).low_u64(), u64::MAX);
    }

    #[test]
    fn decimal_and_hex_formatting() {
        assert_eq!(U256::ZERO.to_string(), "0");
        assert_eq!(U256::from(u128::MAX).to_string(), u128::MAX.to_string());
        assert_eq!(
            U256::MAX.to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
        assert_eq!(format!("{:x}", U256::from(0xABCu16)), "abc");
        assert_eq!(format!("{:#x}", U256::power_of_two(64).unwrap()), "0x10000000000000000");
    }

    #[test]
    fn signed_sign_extension() {
        let minus_two = I256::from(-2i8);
        assert!(minus_two.is_negative());
        let bytes = minus_two.to_le_bytes();
        assert_eq!(bytes[0], 0xFE);
        assert!(bytes[1..].iter().all(|&b| b == 0xFF));
        assert_eq!(minus_two.try_to_i128(), Some(-2));
        assert_eq!(I256::MINUS_ONE, I256::from(-1i64));
        assert_eq!(minus_two.to_string(), "-2");
    }

    #[test]
    fn signed_ordering_and_limits() {
        assert!(I512::MIN < I512::from(-1i32));
        assert!(I512::from(-1i32) < I512::ZERO);
        assert!(I512::ZERO < I512::MAX);
        assert_eq!(I256::MIN.wrapping_neg(), I256::MIN);
        assert_eq!(I256::from(i128::MIN).try_to_i128(), Some(i128::MIN));
        assert_eq!(I256::from_bits(U256::power_of_two(127).unwrap()).try_to_i128(), None);
    }

    #[test]
    fn signed_fixed_width_round_trip() {
        for v in [I256::MIN, I256::from(-300i32), I256::ZERO, I256::MAX] {
            let bytes = v.encode();
            assert_eq!(bytes.len(), 32);
            assert_eq!(I256::decode(&mut Cursor::new(&bytes)), Ok(v));
        }
    }
}
