//! DESFire-style key diversification.
//!
//! K_card = AES-128-ECB(K_master, UID ∥ 00..) — one block, no chaining,
//! no IV. This reproduces a construction found in deployed
//! personalization tooling bit-for-bit so derived keys stay comparable
//! against existing key databases. It is NOT a sound KDF (reversible
//! given the master key, no domain separation); do not use it for new
//! designs.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;
use thiserror::Error;

pub const KEY_SIZE: usize = 16;
pub const MAX_UID_SIZE: usize = 16;

/// Diversification input could not be parsed or is out of bounds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiversifyError {
    #[error("master key must be 32 hex characters (16 bytes), got {0}")]
    MasterKeyLength(usize),
    #[error("master key is not valid hex")]
    MasterKeyNotHex,
    #[error("UID is empty")]
    UidEmpty,
    #[error("UID too long: {0} bytes (max {MAX_UID_SIZE})")]
    UidTooLong(usize),
    #[error("UID is not valid hex")]
    UidNotHex,
}

/// Derive the card key from a 16-byte master key and a 1..=16 byte UID.
/// The UID is zero-padded on the right to one AES block.
pub fn diversify_block(
    master_key: &[u8; KEY_SIZE],
    uid: &[u8],
) -> Result<[u8; KEY_SIZE], DiversifyError> {
    if uid.is_empty() {
        return Err(DiversifyError::UidEmpty);
    }
    if uid.len() > MAX_UID_SIZE {
        return Err(DiversifyError::UidTooLong(uid.len()));
    }

    let mut block = [0u8; KEY_SIZE];
    block[..uid.len()].copy_from_slice(uid);

    let cipher = Aes128::new(GenericArray::from_slice(master_key));
    let mut block = GenericArray::from(block);
    cipher.encrypt_block(&mut block);

    Ok(block.into())
}

fn clean_hex(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Hex-string front end: validates both inputs (spaces stripped, case
/// ignored) and returns the derived key as 32 uppercase hex characters.
pub fn diversify(master_hex: &str, uid_hex: &str) -> Result<String, DiversifyError> {
    let master_hex = clean_hex(master_hex);
    if master_hex.len() != KEY_SIZE * 2 {
        return Err(DiversifyError::MasterKeyLength(master_hex.len()));
    }
    let master: [u8; KEY_SIZE] = hex::decode(&master_hex)
        .map_err(|_| DiversifyError::MasterKeyNotHex)?
        .try_into()
        .map_err(|_| DiversifyError::MasterKeyLength(master_hex.len()))?;

    let uid_hex = clean_hex(uid_hex);
    if uid_hex.is_empty() {
        return Err(DiversifyError::UidEmpty);
    }
    let uid = hex::decode(&uid_hex).map_err(|_| DiversifyError::UidNotHex)?;

    let derived = diversify_block(&master, &uid)?;
    Ok(hex::encode_upper(derived))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "000102030405060708090A0B0C0D0E0F";

    #[test]
    fn fips197_known_answer() {
        // FIPS-197 appendix C.1: a full 16-byte UID needs no padding, so
        // the derived key is the textbook AES-128 ciphertext.
        let derived = diversify(MASTER, "00112233445566778899AABBCCDDEEFF").unwrap();
        assert_eq!(derived, "69C4E0D86A7B0430D8CDB78070B4C55A");
    }

    #[test]
    fn deterministic() {
        let a = diversify(MASTER, "040C6FFA1D2090").unwrap();
        let b = diversify(MASTER, "040C6FFA1D2090").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn output_changes_with_input() {
        let base = diversify(MASTER, "040C6FFA1D2090").unwrap();
        let other_uid = diversify(MASTER, "040C6FFA1D2091").unwrap();
        let other_key = diversify("100102030405060708090A0B0C0D0E0F", "040C6FFA1D2090").unwrap();
        assert_ne!(base, other_uid);
        assert_ne!(base, other_key);
    }

    #[test]
    fn short_uid_is_zero_padded() {
        // explicit trailing zeros must be equivalent to padding
        let short = diversify(MASTER, "0102").unwrap();
        let padded = diversify(MASTER, "01020000000000000000000000000000").unwrap();
        assert_eq!(short, padded);
    }

    #[test]
    fn spaces_and_case_are_normalized() {
        let a = diversify(MASTER, "04 0C 6F FA 1D 20 90").unwrap();
        let b = diversify(&MASTER.to_lowercase(), "040c6ffa1d2090").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn master_key_length_enforced() {
        // 33 hex chars, regardless of content
        let err = diversify("0102030405060708090A0B0C0D0E0F10A", "04").unwrap_err();
        assert_eq!(err, DiversifyError::MasterKeyLength(33));
        let err = diversify("0102", "04").unwrap_err();
        assert_eq!(err, DiversifyError::MasterKeyLength(4));
    }

    #[test]
    fn uid_bounds_enforced() {
        assert_eq!(diversify(MASTER, "").unwrap_err(), DiversifyError::UidEmpty);
        assert_eq!(
            diversify(MASTER, "  ").unwrap_err(),
            DiversifyError::UidEmpty
        );
        // 17 bytes
        let long = "00".repeat(17);
        assert_eq!(
            diversify(MASTER, &long).unwrap_err(),
            DiversifyError::UidTooLong(17)
        );
    }

    #[test]
    fn non_hex_rejected() {
        assert_eq!(
            diversify("GG0102030405060708090A0B0C0D0E0F", "04").unwrap_err(),
            DiversifyError::MasterKeyNotHex
        );
        assert_eq!(
            diversify(MASTER, "ZZ").unwrap_err(),
            DiversifyError::UidNotHex
        );
        // odd-length UID hex cannot decode
        assert_eq!(
            diversify(MASTER, "040").unwrap_err(),
            DiversifyError::UidNotHex
        );
    }
}
