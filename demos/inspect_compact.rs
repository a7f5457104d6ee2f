#![allow(missing_docs)]

//! Prints inspector reports for a handful of compact integers.
//! Run: cargo run --example inspect_compact
//! Pass hex strings as arguments to inspect your own bytes.

use scalecodec::{Compact, CompactInspector, Encodable, U256};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== COMPACT INSPECTOR TOUR ===");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        for arg in args {
            let bytes = hex::decode(arg.trim_start_matches("0x"))?;
            println!("{}", CompactInspector::inspect(&bytes)?);
        }
        return Ok(());
    }

    // ------------------------------------------------------------------
    // One value per mode, as the encoder writes them.
    // ------------------------------------------------------------------
    for value in [63u64, 64, 16_384, 1 << 30] {
        let bytes = Compact(value).encode();
        println!("\n[Value {value}] bytes 0x{}", hex::encode(&bytes));
        println!("{}", CompactInspector::inspect(&bytes)?);
    }

    let wide = U256::power_of_two(255).ok_or("exponent out of range")?;
    let bytes = Compact(wide).encode();
    println!("\n[Value 2^255] {} bytes", bytes.len());
    println!("{}", CompactInspector::inspect(&bytes)?);

    // ------------------------------------------------------------------
    // A padded encoding another implementation might emit.
    // ------------------------------------------------------------------
    println!("\n[Padded] 1 written in four-byte mode");
    let report = CompactInspector::inspect(&[0x06, 0x00, 0x00, 0x00])?;
    println!("{report}");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
