//! # Configuration
//!
//! Tunable knobs for the modules that read files or resample images. Every
//! struct has a `Default` matching the historical behavior, so callers only
//! build one when they need to deviate from it.
//!
//! With the `serde` feature the structs derive `Serialize`/`Deserialize` and a
//! full configuration can be loaded from JSON.

/// Options for reading CSV sheets.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CsvConfig {
    /// Field separator. A data line without it is not a record.
    pub delimiter: char,
    /// A line equal to this string stops reading, wherever it appears.
    pub sentinel: String,
    /// When set, every accepted line is logged and a line without a delimiter
    /// aborts the read. Otherwise such lines are skipped.
    pub strict: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            sentinel: String::from("EOF"),
            strict: false,
        }
    }
}

/// Options for geometric image transforms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformConfig {
    /// ARGB value written where the inverse mapping lands outside the source.
    pub fill_argb: u32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self { fill_argb: 0x0000_0000 }
    }
}

/// Aggregate configuration for the whole crate.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RudimentsConfig {
    pub csv: CsvConfig,
    pub transform: TransformConfig,
}

#[cfg(feature = "serde")]
impl RudimentsConfig {
    /// Loads a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
