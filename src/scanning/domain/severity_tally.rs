use super::{Finding, Severity};
use std::ops::AddAssign;

/// Count of findings per severity for one image
///
/// Always holds all six buckets, indexed in [`Severity::ALL`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityTally {
    counts: [usize; Severity::COUNT],
}

impl SeverityTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups findings by severity
    pub fn from_findings(findings: &[Finding]) -> Self {
        findings.iter().fold(Self::new(), |mut tally, finding| {
            tally.record(finding.severity());
            tally
        })
    }

    pub fn record(&mut self, severity: Severity) {
        self.counts[severity.index()] += 1;
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.counts[severity.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// (severity, count) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (Severity, usize)> + '_ {
        Severity::ALL.iter().map(move |s| (*s, self.count(*s)))
    }
}

impl AddAssign for SeverityTally {
    fn add_assign(&mut self, other: Self) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
    }
}
