#![allow(missing_docs)]

use proptest::prelude::*;
use scalecodec::{
    Compact, DecodeConfig, DecodeError, Decodable, Encodable, I256, Scale, U256, U512, compact_len,
};

#[derive(Debug, Clone, PartialEq, Encodable, Decodable)]
enum Event {
    Ping,
    Transfer {
        from: [u8; 4],
        #[scale(compact)]
        amount: u64,
    },
    Note(String),
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Ping),
        (any::<[u8; 4]>(), any::<u64>()).prop_map(|(from, amount)| Event::Transfer { from, amount }),
        ".{0,16}".prop_map(Event::Note),
    ]
}

/// Length of the smallest mode that holds `v`.
fn minimal_len(v: u128) -> usize {
    match v {
        0..=0x3F => 1,
        0x40..=0x3FFF => 2,
        0x4000..=0x3FFF_FFFF => 4,
        _ => 1 + (16 - v.leading_zeros() as usize / 8),
    }
}

fn round_trip<T: Encodable + Decodable + PartialEq + std::fmt::Debug>(value: &T) {
    let bytes = Scale::encode(value);
    assert_eq!(bytes.len(), Scale::encoded_size(value));
    assert_eq!(Scale::decode::<T>(&bytes).as_ref(), Ok(value));
}

proptest! {
    #[test]
    fn fixed_width_round_trip(a in any::<i8>(), b in any::<u16>(), c in any::<i64>(), d in any::<u128>()) {
        round_trip(&(a, b, c, d));
    }

    #[test]
    fn compact_round_trip(v in any::<u128>()) {
        let bytes = Compact(v).encode();
        prop_assert_eq!(Scale::decode::<Compact<u128>>(&bytes), Ok(Compact(v)));
    }

    #[test]
    fn compact_is_minimal(v in any::<u128>()) {
        let bytes = Compact(v).encode();
        prop_assert_eq!(bytes.len(), minimal_len(v));
        prop_assert_eq!(compact_len(&v), bytes.len());

        // Whatever the encoder writes, strict mode accepts.
        let strict = DecodeConfig::new().canonical(true);
        prop_assert_eq!(Scale::decode_with_config::<Compact<u128>>(&bytes, strict), Ok(Compact(v)));
    }

    #[test]
    fn wide_compact_is_minimal(limbs in any::<[u64; 8]>(), top in 0usize..8) {
        // Zero the limbs above `top` so every magnitude gets exercised.
        let mut limbs = limbs;
        for limb in limbs.iter_mut().skip(top + 1) {
            *limb = 0;
        }
        let value = U512::from_limbs(limbs);
        let bytes = Compact(value).encode();
        if value >= U512::from(1u128 << 30) {
            prop_assert_eq!(bytes.len(), 1 + value.byte_len());
        } else {
            prop_assert_eq!(bytes.len(), minimal_len(u128::from(limbs[0])));
        }
        prop_assert_eq!(compact_len(&value), bytes.len());

        let low = U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]);
        let low_bytes = Compact(low).encode();
        if low >= U256::from(1u128 << 30) {
            prop_assert_eq!(low_bytes.len(), 1 + low.byte_len());
        }
        prop_assert_eq!(compact_len(&low), low_bytes.len());

        let strict = DecodeConfig::new().canonical(true);
        prop_assert_eq!(Scale::decode_with_config::<Compact<U512>>(&bytes, strict), Ok(Compact(value)));
    }

    #[test]
    fn compact_narrowing_matches_range(v in any::<u64>()) {
        let bytes = Compact(v).encode();
        let narrowed = Scale::decode::<Compact<u32>>(&bytes);
        match u32::try_from(v) {
            Ok(small) => prop_assert_eq!(narrowed, Ok(Compact(small))),
            Err(_) => prop_assert!(
                matches!(narrowed, Err(DecodeError::IntegerTooLarge { max_bytes: 4, .. })),
                "expected IntegerTooLarge"
            ),
        }
    }

    #[test]
    fn wide_round_trip(limbs in any::<[u64; 8]>()) {
        let value = U512::from_limbs(limbs);
        round_trip(&value);
        round_trip(&Compact(value));
        let low = U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]);
        round_trip(&I256::from_bits(low));
    }

    #[test]
    fn collections_round_trip(
        items in proptest::collection::vec(any::<Option<u32>>(), 0..64),
        map in proptest::collection::btree_map(any::<u16>(), ".{0,8}", 0..16),
    ) {
        round_trip(&items);
        round_trip(&map);
    }

    #[test]
    fn derived_enum_round_trip(events in proptest::collection::vec(event(), 0..32)) {
        round_trip(&events);
    }

    #[test]
    fn truncation_never_panics(events in proptest::collection::vec(event(), 1..8), cut in any::<prop::sample::Index>()) {
        let bytes = Scale::encode(&events);
        let cut = cut.index(bytes.len());
        prop_assert!(Scale::decode::<Vec<Event>>(&bytes[..cut]).is_err());
    }

    #[test]
    fn arbitrary_bytes_never_panic(data in proptest::collection::vec(any::<u8>(), 0..128)) {
        let _ = Scale::decode::<Vec<Event>>(&data);
        let _ = Scale::decode::<(Compact<U512>, String, Option<bool>)>(&data);
    }
}
