#![allow(missing_docs)]

//! Encodes a nested structure, appends to it in place and decodes it back.
//! Run: RUST_LOG=scalecodec=debug cargo run --example round_trip

use std::collections::BTreeMap;

use scalecodec::{
    BitVec, DecodeConfig, Decodable, Encodable, OptionBool, Scale, U256, append_encodable,
};

#[derive(Debug, Clone, PartialEq, Encodable, Decodable)]
enum Vote {
    Aye,
    Nay,
    Split { aye: u64, nay: u64 },
}

#[derive(Debug, Clone, PartialEq, Encodable, Decodable)]
struct Referendum {
    #[scale(compact)]
    index: u32,
    title: String,
    votes: BTreeMap<[u8; 4], Vote>,
    turnout: U256,
    quorum_reached: OptionBool,
    flags: BitVec,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== SCALE ROUND TRIP ===");

    let mut votes = BTreeMap::new();
    votes.insert(*b"ALIC", Vote::Aye);
    votes.insert(*b"BOB_", Vote::Split { aye: 10, nay: 3 });
    votes.insert(*b"CARL", Vote::Nay);

    let referendum = Referendum {
        index: 1_337,
        title: "Raise the block size".into(),
        votes,
        turnout: U256::from(u128::MAX),
        quorum_reached: OptionBool(Some(true)),
        flags: [true, false, true].into_iter().collect(),
    };

    let bytes = Scale::encode(&referendum);
    println!("\n[Encoded] {} bytes", bytes.len());
    println!("0x{}", hex::encode(&bytes));

    let decoded: Referendum = Scale::decode(&bytes)?;
    assert_eq!(decoded, referendum);
    println!(">> Round trip verified!");

    // ------------------------------------------------------------------
    // Append to an encoded list without decoding it.
    // ------------------------------------------------------------------
    println!("\n[Append] growing an encoded Vec<Vote>");
    let mut encoded_votes = Vec::new();
    for vote in [Vote::Aye, Vote::Nay, Vote::Split { aye: 1, nay: 1 }] {
        append_encodable(&mut encoded_votes, &vote)?;
    }
    let votes: Vec<Vote> = Scale::decode(&encoded_votes)?;
    println!(">> {} votes after append: {votes:?}", votes.len());

    // ------------------------------------------------------------------
    // Hostile input: a huge length prefix is rejected before allocation.
    // ------------------------------------------------------------------
    println!("\n[Hostile] length prefix claiming 2^29 - 1 elements");
    let hostile = [0xFE, 0xFF, 0xFF, 0x7F];
    let config = DecodeConfig::new().with_max_collection_len(1 << 16);
    match Scale::decode_with_config::<Vec<Vote>>(&hostile, config) {
        Ok(_) => println!(">> unexpectedly decoded"),
        Err(err) => println!(">> rejected: {err}"),
    }

    Ok(())
}
