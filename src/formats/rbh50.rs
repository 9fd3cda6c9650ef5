//! RBH 50-bit Wiegand encoder and reverse decoder.
//!
//! Layout: [P1][site 16-bit][card 32-bit][P2], 50 bits total. P1 is the
//! even-parity bit over the site bits, P2 over the card bits (each is 0
//! when its span already has an even count of ones). Reverse decode is
//! lenient: parity bits are extracted past, not verified, which matches
//! deployed reader behaviour — [`decode_strict`] is the opt-in checked
//! variant.

use thiserror::Error;

use super::common::{byte_pattern, even_parity_bit, sum_checksum, xor_checksum};
use super::{CardFormat, Section};
use crate::credential::{CredentialPair, FieldLimits};

pub const LIMITS: FieldLimits = FieldLimits {
    card_max: u32::MAX,
    separators: &[':', '-', ' '],
};

const PACKED_BITS: u32 = 50;

/// A 50-bit packed value could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty hex input")]
    Empty,
    #[error("invalid hex '{0}'")]
    BadHex(String),
    #[error("value is wider than 50 bits")]
    TooWide,
    #[error("parity mismatch: expected P1={expected_p1} P2={expected_p2}")]
    ParityMismatch { expected_p1: u8, expected_p2: u8 },
}

/// All derived representations for one pair under the RBH 50-bit layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rbh50View {
    pub site_hex: String,
    pub card_hex: String,
    pub site_bin: String,
    pub card_bin: String,
    pub full_50bit_bin: String,
    pub full_50bit_hex: String,
    pub full_50bit_dec: String,
    pub data_48bit_bin: String,
    pub data_48bit_hex: String,
    pub site_be: String,
    pub site_le: String,
    pub card_be: String,
    pub card_le: String,
    pub full_be: String,
    pub full_le: String,
    pub wiegand_hex: String,
    pub wiegand_bin: String,
    pub xor: String,
    pub sum: String,
}

/// Pack a pair into the 50-bit value: P1(49) site(48..33) card(32..1) P2(0).
fn pack(pair: &CredentialPair) -> u64 {
    let p1 = even_parity_bit(pair.site_code as u64);
    let p2 = even_parity_bit(pair.card_number as u64);
    (p1 << 49) | ((pair.site_code as u64) << 33) | ((pair.card_number as u64) << 1) | p2
}

/// Encode a validated pair into every RBH 50-bit representation.
pub fn encode(pair: &CredentialPair) -> Rbh50View {
    let site = pair.site_code;
    let card = pair.card_number;

    let site_bytes = site.to_be_bytes();
    let card_bytes = card.to_be_bytes();

    let packed = pack(pair);
    let data_48 = ((site as u64) << 32) | card as u64;

    let full_50bit_bin = format!("{packed:050b}");
    let full_50bit_hex = format!("{packed:013X}");

    Rbh50View {
        site_hex: format!("{site:04X}"),
        card_hex: format!("{card:08X}"),
        site_bin: format!("{site:016b}"),
        card_bin: format!("{card:032b}"),
        full_50bit_hex: full_50bit_hex.clone(),
        full_50bit_dec: packed.to_string(),
        data_48bit_bin: format!("{data_48:048b}"),
        data_48bit_hex: format!("{data_48:012X}"),
        site_be: byte_pattern(&site_bytes),
        site_le: byte_pattern(&[site_bytes[1], site_bytes[0]]),
        card_be: byte_pattern(&card_bytes),
        card_le: byte_pattern(&[card_bytes[3], card_bytes[2], card_bytes[1], card_bytes[0]]),
        full_be: byte_pattern(&[
            site_bytes[0],
            site_bytes[1],
            card_bytes[0],
            card_bytes[1],
            card_bytes[2],
            card_bytes[3],
        ]),
        full_le: byte_pattern(&[
            card_bytes[3],
            card_bytes[2],
            card_bytes[1],
            card_bytes[0],
            site_bytes[1],
            site_bytes[0],
        ]),
        wiegand_hex: full_50bit_hex,
        wiegand_bin: full_50bit_bin.clone(),
        full_50bit_bin,
        xor: format!("{:08X}", xor_checksum(site, card)),
        sum: format!("{:08X}", sum_checksum(site, card, 32)),
    }
}

fn parse_packed(packed_hex: &str) -> Result<u64, DecodeError> {
    let cleaned: String = packed_hex
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if cleaned.is_empty() {
        return Err(DecodeError::Empty);
    }
    let value =
        u64::from_str_radix(&cleaned, 16).map_err(|_| DecodeError::BadHex(cleaned.clone()))?;
    if value >> PACKED_BITS != 0 {
        return Err(DecodeError::TooWide);
    }
    Ok(value)
}

fn extract(value: u64) -> CredentialPair {
    CredentialPair {
        site_code: ((value >> 33) & 0xFFFF) as u16,
        card_number: ((value >> 1) & 0xFFFF_FFFF) as u32,
    }
}

/// Reverse-decode a packed 50-bit hex value (from a dump or capture)
/// back to site code and card number. Embedded spaces are stripped and
/// case is ignored. Parity bits are NOT verified.
pub fn decode(packed_hex: &str) -> Result<CredentialPair, DecodeError> {
    Ok(extract(parse_packed(packed_hex)?))
}

/// Like [`decode`] but also recomputes both parity bits and fails on
/// mismatch. Useful when validating suspect dump data.
pub fn decode_strict(packed_hex: &str) -> Result<CredentialPair, DecodeError> {
    let value = parse_packed(packed_hex)?;
    let pair = extract(value);
    let expected = pack(&pair);
    if expected != value {
        return Err(DecodeError::ParityMismatch {
            expected_p1: (expected >> 49) as u8,
            expected_p2: (expected & 1) as u8,
        });
    }
    Ok(pair)
}

pub struct Rbh50Format;

impl CardFormat for Rbh50Format {
    fn name(&self) -> &'static str {
        "RBH50"
    }

    fn limits(&self) -> FieldLimits {
        LIMITS
    }

    fn encode_sections(&self, pair: &CredentialPair) -> Vec<Section> {
        let v = encode(pair);
        vec![
            Section::new(
                "INPUT VALUES",
                vec![
                    ("Site Code (Decimal)", pair.site_code.to_string()),
                    ("Card Number (Decimal)", pair.card_number.to_string()),
                    (
                        "Combined",
                        format!("{}:{}", pair.site_code, pair.card_number),
                    ),
                ],
            ),
            Section::new(
                "HEXADECIMAL",
                vec![
                    ("Site Code (16-bit)", format!("0x{}", v.site_hex)),
                    ("Card Number (32-bit)", format!("0x{}", v.card_hex)),
                ],
            ),
            Section::new(
                "BINARY",
                vec![
                    ("Site Code (16-bit)", v.site_bin),
                    ("Card Number (32-bit)", v.card_bin),
                ],
            ),
            Section::new(
                "50-BIT CREDENTIAL",
                vec![
                    ("Full 50-bit (Binary)", v.full_50bit_bin),
                    ("Full 50-bit (Hex)", v.full_50bit_hex),
                    ("Full 50-bit (Decimal)", v.full_50bit_dec),
                ],
            ),
            Section::new(
                "48-BIT DATA (No Parity)",
                vec![
                    ("48-bit (Hex)", v.data_48bit_hex),
                    ("48-bit (Binary)", v.data_48bit_bin),
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
                    ("Big Endian (SC + CN)", v.full_be),
                    ("Little Endian (CN + SC)", v.full_le),
                ],
            ),
            Section::new(
                "WIEGAND OUTPUT",
                vec![
                    ("50-bit Wiegand (Hex)", v.wiegand_hex),
                    ("50-bit Wiegand (Binary)", v.wiegand_bin),
                ],
            ),
            Section::new(
                "CHECKSUMS",
                vec![("XOR", v.xor), ("SUM", v.sum)],
            ),
        ]
    }
}
