use serde::{Deserialize, Deserializer};
use std::fmt;

/// Severity level reported by the scanner for a single finding
///
/// The declaration order is the report column order, so `Ord` and
/// [`Severity::ALL`] agree with the CSV layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Negligible,
    #[default]
    Unknown,
}

impl Severity {
    /// Number of severity buckets
    pub const COUNT: usize = 6;

    /// All severities in report column order
    pub const ALL: [Severity; Severity::COUNT] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Negligible,
        Severity::Unknown,
    ];

    /// Column name used in the report header
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Negligible => "Negligible",
            Severity::Unknown => "Unknown",
        }
    }

    /// Position of this severity in [`Severity::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parses scanner severity text, case-insensitively
    ///
    /// Anything outside the six known names falls into `Unknown`.
    pub fn from_scanner_text(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            "negligible" => Severity::Negligible,
            _ => Severity::Unknown,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        Ok(text
            .as_deref()
            .map(Severity::from_scanner_text)
            .unwrap_or_default())
    }
}
