//! Shared credential types and input parsing used by all card formats.
//!
//! A credential is a (site code, card number) pair. Site codes are 16-bit
//! in every format we handle; the card number width varies per format
//! (16-bit for Kantech, 32-bit for RBH 50-bit), so the legal bound lives
//! in [`FieldLimits`] and is supplied by the format.

use thiserror::Error;

/// A validated site-code / card-number pair.
///
/// Constructed fresh per calculation via [`parse_pair`] or
/// [`CredentialPair::checked`]; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPair {
    pub site_code: u16,
    pub card_number: u32,
}

/// Per-format input policy: card-number bound and accepted combined-input
/// separators (tried in order, first one present in the string wins).
#[derive(Debug, Clone, Copy)]
pub struct FieldLimits {
    pub card_max: u32,
    pub separators: &'static [char],
}

pub const SITE_MAX: u16 = u16::MAX;

/// A field value exceeded its bit width for the active format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field} out of range: {value} (must be 0-{max})")]
pub struct RangeError {
    pub field: &'static str,
    pub value: u64,
    pub max: u64,
}

/// Input could not be turned into a credential pair.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("enter site code + card number, or a combined value")]
    Empty,
    #[error("combined value needs a separator ({0})")]
    MissingSeparator(&'static str),
    #[error("invalid {field} '{text}': decimal digits only")]
    BadNumber { field: &'static str, text: String },
    #[error(transparent)]
    Range(#[from] RangeError),
}

impl CredentialPair {
    /// Range-check raw values against the format's limits.
    pub fn checked(site: u64, card: u64, limits: &FieldLimits) -> Result<Self, RangeError> {
        if site > SITE_MAX as u64 {
            return Err(RangeError {
                field: "site code",
                value: site,
                max: SITE_MAX as u64,
            });
        }
        if card > limits.card_max as u64 {
            return Err(RangeError {
                field: "card number",
                value: card,
                max: limits.card_max as u64,
            });
        }
        Ok(Self {
            site_code: site as u16,
            card_number: card as u32,
        })
    }
}

fn parse_decimal(field: &'static str, text: &str) -> Result<u64, ParseError> {
    text.trim().parse::<u64>().map_err(|_| ParseError::BadNumber {
        field,
        text: text.trim().to_string(),
    })
}

/// Parse either two separate decimal fields or one combined `SITE<sep>CARD`
/// string into a validated pair.
///
/// A non-empty combined string takes precedence over the separate fields.
/// Separators come from the format ([`FieldLimits::separators`]) and are
/// tried in order; decimal only, no hex prefixes.
pub fn parse_pair(
    site_text: &str,
    card_text: &str,
    combined_text: &str,
    limits: &FieldLimits,
) -> Result<CredentialPair, ParseError> {
    let combined = combined_text.trim();
    let (site, card) = if !combined.is_empty() {
        let sep = limits
            .separators
            .iter()
            .find(|&&s| combined.contains(s))
            .ok_or(ParseError::MissingSeparator(separator_hint(limits)))?;
        let mut parts = combined.splitn(2, *sep);
        let site_part = parts.next().unwrap_or("");
        let card_part = parts.next().unwrap_or("");
        (
            parse_decimal("site code", site_part)?,
            parse_decimal("card number", card_part)?,
        )
    } else {
        let site_text = site_text.trim();
        let card_text = card_text.trim();
        if site_text.is_empty() || card_text.is_empty() {
            return Err(ParseError::Empty);
        }
        (
            parse_decimal("site code", site_text)?,
            parse_decimal("card number", card_text)?,
        )
    };
    Ok(CredentialPair::checked(site, card, limits)?)
}

fn separator_hint(limits: &FieldLimits) -> &'static str {
    // Hints for the two separator sets in use today.
    if limits.separators.len() == 1 {
        "use SITE:CARD"
    } else {
        "use SITE:CARD, SITE-CARD, or SITE CARD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const K: FieldLimits = FieldLimits {
        card_max: u16::MAX as u32,
        separators: &[':'],
    };
    const R: FieldLimits = FieldLimits {
        card_max: u32::MAX,
        separators: &[':', '-', ' '],
    };

    #[test]
    fn separate_fields() {
        let p = parse_pair("8020", "11485", "", &K).unwrap();
        assert_eq!(p.site_code, 8020);
        assert_eq!(p.card_number, 11485);
    }

    #[test]
    fn combined_takes_precedence() {
        let p = parse_pair("1", "2", "8020:11485", &K).unwrap();
        assert_eq!(p.site_code, 8020);
        assert_eq!(p.card_number, 11485);
    }

    #[test]
    fn combined_separator_order() {
        // ':' wins over '-' and space for RBH
        let p = parse_pair("", "", "4000:12345", &R).unwrap();
        assert_eq!((p.site_code, p.card_number), (4000, 12345));
        let p = parse_pair("", "", "4000-12345", &R).unwrap();
        assert_eq!((p.site_code, p.card_number), (4000, 12345));
        let p = parse_pair("", "", "4000 12345", &R).unwrap();
        assert_eq!((p.site_code, p.card_number), (4000, 12345));
    }

    #[test]
    fn kantech_rejects_dash_separator() {
        let err = parse_pair("", "", "8020-11485", &K).unwrap_err();
        assert!(matches!(err, ParseError::MissingSeparator(_)));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(parse_pair("", "", "", &K), Err(ParseError::Empty)));
        assert!(matches!(
            parse_pair("8020", "", "", &K),
            Err(ParseError::Empty)
        ));
    }

    #[test]
    fn decimal_only() {
        let err = parse_pair("0x1F54", "11485", "", &K).unwrap_err();
        assert!(matches!(err, ParseError::BadNumber { field: "site code", .. }));
    }

    #[test]
    fn site_range() {
        // 65536 is out of range for every format
        for limits in [&K, &R] {
            let err = parse_pair("65536", "1", "", limits).unwrap_err();
            match err {
                ParseError::Range(r) => {
                    assert_eq!(r.field, "site code");
                    assert_eq!(r.max, 65535);
                }
                other => panic!("expected RangeError, got {other:?}"),
            }
        }
    }

    #[test]
    fn card_range_per_format() {
        // 65536 legal for RBH, illegal for Kantech
        assert!(parse_pair("1", "65536", "", &R).is_ok());
        assert!(matches!(
            parse_pair("1", "65536", "", &K),
            Err(ParseError::Range(_))
        ));
        // 2^32 illegal everywhere
        let err = parse_pair("1", "4294967296", "", &R).unwrap_err();
        match err {
            ParseError::Range(r) => {
                assert_eq!(r.field, "card number");
                assert_eq!(r.max, 4294967295);
            }
            other => panic!("expected RangeError, got {other:?}"),
        }
    }
}
