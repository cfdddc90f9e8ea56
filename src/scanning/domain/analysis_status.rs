use std::fmt;

/// Result of a registration or poll call against the scanner
///
/// Only the literal `analyzed` is terminal. Every other status text,
/// including failures reported by the scanner, counts as still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// Analysis not finished; carries the raw status text for diagnostics
    Pending(String),
    Analyzed,
}

impl AnalysisStatus {
    const ANALYZED: &'static str = "analyzed";

    pub fn from_status_text(text: &str) -> Self {
        if text == Self::ANALYZED {
            AnalysisStatus::Analyzed
        } else {
            AnalysisStatus::Pending(text.to_string())
        }
    }

    pub fn is_analyzed(&self) -> bool {
        matches!(self, AnalysisStatus::Analyzed)
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisStatus::Analyzed => f.write_str(Self::ANALYZED),
            AnalysisStatus::Pending(raw) => write!(f, "pending ({})", raw),
        }
    }
}
