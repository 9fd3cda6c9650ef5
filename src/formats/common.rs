//! Leaf helpers shared by the format encoders: even parity, checksums,
//! and byte-pattern formatting.

/// Even-parity bit over a value's set bits: 0 when the count of ones is
/// already even, 1 otherwise (the bit that makes the total even).
#[inline]
pub fn even_parity_bit(value: u64) -> u64 {
    (value.count_ones() & 1) as u64
}

/// Render bytes as space-separated uppercase hex pairs ("1F 54 2C DD"),
/// the shape used when grepping hexdumps.
pub fn byte_pattern(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// XOR checksum of site and card, caller formats to the field width.
#[inline]
pub fn xor_checksum(site: u16, card: u32) -> u32 {
    (site as u32) ^ card
}

/// Additive checksum truncated to `width_bits` (16 or 32).
#[inline]
pub fn sum_checksum(site: u16, card: u32, width_bits: u32) -> u32 {
    let sum = site as u64 + card as u64;
    (sum & ((1u64 << width_bits) - 1)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_even_counts() {
        assert_eq!(even_parity_bit(0), 0);
        assert_eq!(even_parity_bit(0b11), 0);
        assert_eq!(even_parity_bit(0b111), 1);
        assert_eq!(even_parity_bit(0xFFFF), 0);
        assert_eq!(even_parity_bit(0xFFFFFFFF), 0);
    }

    #[test]
    fn byte_pattern_format() {
        assert_eq!(byte_pattern(&[0x1F, 0x54, 0x2C, 0xDD]), "1F 54 2C DD");
        assert_eq!(byte_pattern(&[0x00]), "00");
    }

    #[test]
    fn checksums() {
        assert_eq!(xor_checksum(8020, 11485), 0x3389);
        assert_eq!(sum_checksum(8020, 11485, 16), 0x4C31);
        // 16-bit sum wraps
        assert_eq!(sum_checksum(0xFFFF, 1, 16), 0);
        assert_eq!(sum_checksum(0xFFFF, 1, 32), 0x10000);
    }
}
