// src/inspector.rs

//! Tools for inspecting compact integers on the wire.
//! Useful when two implementations disagree about a length prefix or an amount.

use serde::Serialize;

use crate::compact::{CompactMode, RawCompact};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::wide::U512;

/// A structural report of one compact integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompactReport {
    /// Mode named by the low two header bits.
    pub mode: CompactMode,
    /// The first byte.
    pub header: u8,
    /// Bytes the value occupied, header included.
    pub encoded_len: usize,
    /// Bytes the minimal encoding of the same value needs.
    pub minimal_len: usize,
    /// Bytes needed to hold the value itself.
    pub significant_bytes: usize,
    /// The value in hexadecimal, most significant digit first.
    pub value_hex: String,
    /// The value in decimal, when it fits 512 bits.
    pub value_decimal: Option<String>,
    /// Narrowest unsigned type the value decodes into.
    pub narrowest_type: Option<&'static str>,
    /// Whether the encoder would have produced exactly these bytes.
    pub canonical: bool,
}

/// The compact integer inspector.
#[derive(Debug)]
pub struct CompactInspector;

impl CompactInspector {
    /// Analyzes the compact integer at the start of `bytes`.
    ///
    /// Trailing bytes after the integer are ignored. Fails with the same errors a
    /// lenient decode would report for a truncated encoding.
    pub fn inspect(bytes: &[u8]) -> Result<CompactReport> {
        let mut cursor = Cursor::new(bytes);
        let raw = RawCompact::read(&mut cursor)?;
        let significant = raw.significant_bytes();

        Ok(CompactReport {
            mode: raw.mode(),
            header: raw.header(),
            encoded_len: raw.encoded_len(),
            minimal_len: raw.minimal_len(),
            significant_bytes: significant.len(),
            value_hex: Self::hex_be(&significant),
            value_decimal: raw.into_value::<U512>().ok().map(|v| v.to_string()),
            narrowest_type: Self::narrowest_type(significant.len()),
            canonical: raw.is_canonical(),
        })
    }

    fn hex_be(le: &[u8]) -> String {
        let digits: String = le.iter().rev().map(|byte| format!("{byte:02x}")).collect();
        // The top byte is non-zero, so at most one leading zero nibble.
        match digits.strip_prefix('0') {
            Some(rest) => format!("0x{rest}"),
            None if digits.is_empty() => "0x0".to_string(),
            None => format!("0x{digits}"),
        }
    }

    fn narrowest_type(significant: usize) -> Option<&'static str> {
        match significant {
            0..=1 => Some("u8"),
            2 => Some("u16"),
            3..=4 => Some("u32"),
            5..=8 => Some("u64"),
            9..=16 => Some("u128"),
            17..=32 => Some("U256"),
            33..=64 => Some("U512"),
            _ => None,
        }
    }
}

impl std::fmt::Display for CompactReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== COMPACT INSPECTOR REPORT ===")?;
        writeln!(f, "Header:         0x{:02x}", self.header)?;
        writeln!(f, "\n[LAYOUT]")?;
        writeln!(f, "├── Mode: {:?}", self.mode)?;
        writeln!(
            f,
            "├── Size: {}b (minimal {}b)",
            self.encoded_len, self.minimal_len
        )?;
        writeln!(
            f,
            "├── Value: {}{}",
            self.value_hex,
            self.value_decimal
                .as_deref()
                .map(|d| format!(" [{d}]"))
                .unwrap_or_default()
        )?;
        writeln!(
            f,
            "├── Fits: {}",
            self.narrowest_type.unwrap_or("none (wider than 512 bits)")
        )?;
        writeln!(
            f,
            "└── Canonical: {}",
            if self.canonical { "yes" } else { "NO" }
        )
    }
}
