//! Kantech simple-layout encoder.
//!
//! 16-bit site code and 16-bit card number, no parity. The combined
//! values are plain concatenations: 32-bit = site(16) ∥ card(16), and a
//! 48-bit variant built with a 32-bit shift. Byte patterns cover each
//! field big/little-endian plus the full 4-byte sequence both ways.

use super::common::{byte_pattern, sum_checksum, xor_checksum};
use super::{CardFormat, Section};
use crate::credential::{CredentialPair, FieldLimits};

pub const LIMITS: FieldLimits = FieldLimits {
    card_max: u16::MAX as u32,
    separators: &[':'],
};

/// All derived representations for one pair under the Kantech layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KantechView {
    pub site_hex: String,
    pub card_hex: String,
    pub card_hex_32: String,
    pub site_bin: String,
    pub card_bin: String,
    pub combined_32: String,
    pub combined_48: String,
    pub site_be: String,
    pub site_le: String,
    pub card_be: String,
    pub card_le: String,
    pub full_be: String,
    pub full_le: String,
    pub xor: String,
    pub sum: String,
}

/// Encode a validated pair into every Kantech representation.
pub fn encode(pair: &CredentialPair) -> KantechView {
    let site = pair.site_code;
    let card = pair.card_number as u16;

    let site_bytes = site.to_be_bytes();
    let card_bytes = card.to_be_bytes();

    let combined_32 = ((site as u32) << 16) | card as u32;
    // The 48-bit variant shifts the 16-bit site by a full 32 bits, so the
    // middle 16 bits are always zero. Field tooling expects exactly this
    // 12-digit shape; do not "fix" the shift.
    let combined_48 = ((site as u64) << 32) | card as u64;

    KantechView {
        site_hex: format!("{site:04X}"),
        card_hex: format!("{card:04X}"),
        card_hex_32: format!("{:08X}", card as u32),
        site_bin: format!("{site:016b}"),
        card_bin: format!("{card:016b}"),
        combined_32: format!("{combined_32:08X}"),
        combined_48: format!("{combined_48:012X}"),
        site_be: byte_pattern(&site_bytes),
        site_le: byte_pattern(&[site_bytes[1], site_bytes[0]]),
        card_be: byte_pattern(&card_bytes),
        card_le: byte_pattern(&[card_bytes[1], card_bytes[0]]),
        full_be: byte_pattern(&[site_bytes[0], site_bytes[1], card_bytes[0], card_bytes[1]]),
        full_le: byte_pattern(&[card_bytes[1], card_bytes[0], site_bytes[1], site_bytes[0]]),
        xor: format!("{:04X}", xor_checksum(site, card as u32)),
        sum: format!("{:04X}", sum_checksum(site, card as u32, 16)),
    }
}

pub struct KantechFormat;

impl CardFormat for KantechFormat {
    fn name(&self) -> &'static str {
        "Kantech"
    }

    fn limits(&self) -> FieldLimits {
        LIMITS
    }

    fn encode_sections(&self, pair: &CredentialPair) -> Vec<Section> {
        let v = encode(pair);
        vec![
            Section::new(
                "INPUT",
                vec![
                    ("Site Code", pair.site_code.to_string()),
                    ("Card Number", pair.card_number.to_string()),
                    (
                        "Combined",
                        format!("{}:{:05}", pair.site_code, pair.card_number),
                    ),
                ],
            ),
            Section::new(
                "HEXADECIMAL",
                vec![
                    ("Site Code (16-bit)", format!("0x{}", v.site_hex)),
                    ("Card Number (16-bit)", format!("0x{}", v.card_hex)),
                    ("Card Number (32-bit)", format!("0x{}", v.card_hex_32)),
                ],
            ),
            Section::new(
                "BINARY",
                vec![("Site Code", v.site_bin), ("Card Number", v.card_bin)],
            ),
            Section::new(
                "COMBINED FORMATS",
                vec![
                    ("32-bit (SC|CN)", v.combined_32),
                    ("48-bit (SC|CN)", v.combined_48),
                ],
            ),
            Section::new(
                "BYTE PATTERNS",
                vec![
                    ("Site (Big Endian)", v.site_be),
                    ("Site (Little Endian)", v.site_le),
                    ("Card (Big Endian)", v.card_be),
                    ("Card (Little Endian)", v.card_le),
                ],
            ),
            Section::new(
                "FULL SEQUENCES",
                vec![
                    ("Big Endian (SC CN)", v.full_be),
                    ("Little Endian (CN SC)", v.full_le),
                ],
            ),
            Section::new(
                "CHECKSUMS",
                vec![("XOR (site ^ card)", v.xor), ("SUM (site + card)", v.sum)],
            ),
        ]
    }
}
