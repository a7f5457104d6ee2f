#![allow(missing_docs)]

use rayon::prelude::*;
use scalecodec::{
    BitVec, Compact, CompactInspector, CompactMode, DecodeError, Decodable, Encodable, I256,
    OptionBool, Scale, U256, U512, append_or_new_vec, compact_len,
};

fn hex_of<T: Encodable + ?Sized>(value: &T) -> String {
    hex::encode(Scale::encode(value))
}

fn bytes(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).expect("valid hex literal")
}

#[derive(Debug, PartialEq, Encodable, Decodable)]
enum Either {
    Left(u8),
    Right(bool),
}

// --- WIRE VECTORS ---

#[test]
fn test_compact_mode_boundaries() {
    assert_eq!(hex_of(&Compact(0u32)), "00");
    assert_eq!(hex_of(&Compact(63u32)), "fc");
    assert_eq!(hex_of(&Compact(64u32)), "0101");
    assert_eq!(hex_of(&Compact(16383u32)), "fdff");
    assert_eq!(hex_of(&Compact(16384u32)), "02000100");
    assert_eq!(hex_of(&Compact((1u32 << 30) - 1)), "feffffff");
    assert_eq!(hex_of(&Compact(1u32 << 30)), "0300000040");
    assert_eq!(hex_of(&Compact(u32::MAX)), "03ffffffff");
    assert_eq!(hex_of(&Compact(u64::MAX)), "13ffffffffffffffff");
    assert_eq!(hex_of(&Compact(1u128 << 64)), "17000000000000000001");
}

#[test]
fn test_compact_boundary_lengths() {
    for (value, len) in [
        (0u64, 1),
        ((1 << 6) - 1, 1),
        (1 << 6, 2),
        ((1 << 14) - 1, 2),
        (1 << 14, 4),
        ((1 << 30) - 1, 4),
        (1 << 30, 5),
        ((1 << 32) - 1, 5),
        (1 << 32, 6),
    ] {
        assert_eq!(Compact(value).encode().len(), len, "value {value}");
        assert_eq!(compact_len(&value), len, "value {value}");
    }
}

#[test]
fn test_wide_compact_values() -> scalecodec::Result<()> {
    assert_eq!(Compact(U512::MAX).encode().len(), 65);
    assert_eq!(Compact(U512::MAX).encode()[0], ((64 - 4) << 2) | 0b11);
    assert_eq!(
        Scale::decode::<Compact<U512>>(&Compact(U512::MAX).encode())?,
        Compact(U512::MAX)
    );

    let big = U256::power_of_two(200).expect("in range");
    let encoded = Compact(big).encode();
    assert_eq!(encoded.len(), 1 + 26);
    assert_eq!(Scale::decode::<Compact<U256>>(&encoded)?.0, big);

    // Too wide for the target.
    assert_eq!(
        Scale::decode::<Compact<u64>>(&encoded),
        Err(DecodeError::IntegerTooLarge {
            bytes: 26,
            max_bytes: 8
        })
    );
    Ok(())
}

#[test]
fn test_primitive_vectors() {
    assert_eq!(hex_of(&false), "00");
    assert_eq!(hex_of(&true), "01");
    assert_eq!(hex_of(&None::<u8>), "00");
    assert_eq!(hex_of(&Some(5u8)), "0105");
    assert_eq!(hex_of(&vec![1u8, 2, 3]), "0c010203");
    assert_eq!(hex_of(&OptionBool(Some(false))), "02");
    assert_eq!(hex_of(&(-1i32)), "ffffffff");
    assert_eq!(hex_of(&0x0102_0304_0506_0708u64), "0807060504030201");
}

#[test]
fn test_wide_fixed_width_vectors() -> scalecodec::Result<()> {
    let one = U256::ONE;
    assert_eq!(hex_of(&one), format!("01{}", "00".repeat(31)));
    assert_eq!(hex_of(&I256::MINUS_ONE), "ff".repeat(32));
    assert_eq!(Scale::decode::<I256>(&bytes(&"ff".repeat(32)))?, I256::MINUS_ONE);
    assert_eq!(
        Scale::decode::<U512>(&[0u8; 63]),
        Err(DecodeError::OutOfData {
            needed: 64,
            remaining: 63
        })
    );
    Ok(())
}

#[test]
fn test_error_vectors() {
    assert_eq!(
        Scale::decode::<u32>(&bytes("010203")),
        Err(DecodeError::OutOfData {
            needed: 4,
            remaining: 3
        })
    );
    assert_eq!(
        Scale::decode::<Either>(&[]),
        Err(DecodeError::OutOfData {
            needed: 1,
            remaining: 0
        })
    );
    assert_eq!(
        Scale::decode::<Either>(&bytes("ff")),
        Err(DecodeError::InvalidVariantIndex {
            index: 0xFF,
            count: 2
        })
    );
    assert_eq!(
        Scale::decode::<bool>(&bytes("02")),
        Err(DecodeError::InvalidBoolean(2))
    );
    assert_eq!(
        Scale::decode::<Option<u8>>(&bytes("0205")),
        Err(DecodeError::InvalidOptionTag(2))
    );
}

// --- SUPPLEMENTARY CODECS ---

#[test]
fn test_bitvec_wire_format() -> scalecodec::Result<()> {
    let bits: BitVec = [true, true, false, false, false, false, true]
        .into_iter()
        .collect();
    assert_eq!(hex_of(&bits), "1c43");
    assert_eq!(Scale::decode::<BitVec>(&bytes("1c43"))?, bits);
    Ok(())
}

#[test]
fn test_append_matches_fresh_encoding() -> scalecodec::Result<()> {
    let mut encoded = Vec::new();
    for word in ["a", "bc", "def"] {
        append_or_new_vec(&mut encoded, &word.encode())?;
    }
    assert_eq!(encoded, vec!["a", "bc", "def"].encode());
    assert_eq!(
        Scale::decode::<Vec<String>>(&encoded)?,
        vec!["a".to_string(), "bc".to_string(), "def".to_string()]
    );
    Ok(())
}

#[test]
fn test_inspector_on_wire_bytes() -> scalecodec::Result<()> {
    let report = CompactInspector::inspect(&bytes("0300000040"))?;
    assert_eq!(report.mode, CompactMode::BigInteger);
    assert_eq!(report.value_decimal.as_deref(), Some("1073741824"));
    assert!(report.canonical);
    assert!(report.to_string().contains("COMPACT INSPECTOR REPORT"));
    Ok(())
}

// --- CONCURRENCY ---

/// Independent decodes share nothing, so they can run on any number of threads.
#[test]
fn test_parallel_independent_decodes() {
    let payloads: Vec<Vec<u8>> = (0u64..2_000)
        .map(|i| Scale::encode(&(Compact(i * 7_919), vec![i as u32; (i % 17) as usize])))
        .collect();

    let decoded: Vec<(Compact<u64>, Vec<u32>)> = payloads
        .par_iter()
        .map(|bytes| Scale::decode(bytes))
        .collect::<scalecodec::Result<_>>()
        .expect("every payload decodes");

    for (i, (value, items)) in decoded.into_iter().enumerate() {
        let i = i as u64;
        assert_eq!(value.0, i * 7_919);
        assert_eq!(items.len(), (i % 17) as usize);
    }
}

#[test]
fn test_parallel_encodes_are_deterministic() {
    let value = (U256::MAX, vec![Some(1u16), None], "same".to_string());
    let reference = Scale::encode(&value);
    let all_equal = (0..256)
        .into_par_iter()
        .map(|_| Scale::encode(&value))
        .all(|bytes| bytes == reference);
    assert!(all_equal);
}
