//! Card format encoders for access-control credential layouts.
//!
//! Each format module turns a validated [`CredentialPair`] into every
//! representation useful when searching dumps or reading Wiegand traffic:
//! hex/binary per field, combined values, big/little-endian byte
//! patterns, and checksums. Formats share the leaf helpers in [`common`]
//! and expose a uniform [`CardFormat`] trait for name-based dispatch.

pub mod common;
pub mod kantech;
pub mod rbh50;

use serde::Serialize;

use crate::credential::{CredentialPair, FieldLimits};

/// One labelled group of derived values (HEXADECIMAL, BYTE PATTERNS, ...).
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub name: &'static str,
    pub entries: Vec<(&'static str, String)>,
}

impl Section {
    pub fn new(name: &'static str, entries: Vec<(&'static str, String)>) -> Self {
        Self { name, entries }
    }
}

/// Trait for credential card formats.
///
/// A format defines its input policy (card-number bound, combined-input
/// separators) and how a pair flattens into display sections.
pub trait CardFormat: Send + Sync {
    /// Format name used for CLI dispatch
    fn name(&self) -> &'static str;

    /// Card-number bound and combined-input separators
    fn limits(&self) -> FieldLimits;

    /// All derived representations, grouped into named sections
    fn encode_sections(&self, pair: &CredentialPair) -> Vec<Section>;
}

/// Registry of all supported card formats
pub struct FormatRegistry {
    formats: Vec<Box<dyn CardFormat>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        let formats: Vec<Box<dyn CardFormat>> = vec![
            Box::new(kantech::KantechFormat),
            Box::new(rbh50::Rbh50Format),
        ];
        Self { formats }
    }

    /// Get a format by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&dyn CardFormat> {
        self.formats
            .iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .map(|f| f.as_ref())
    }

    /// List all format names
    pub fn list_formats(&self) -> Vec<&'static str> {
        self.formats.iter().map(|f| f.name()).collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lookup() {
        let reg = FormatRegistry::new();
        assert!(reg.get("kantech").is_some());
        assert!(reg.get("RBH50").is_some());
        assert!(reg.get("hid").is_none());
        assert_eq!(reg.list_formats(), vec!["Kantech", "RBH50"]);
    }
}
