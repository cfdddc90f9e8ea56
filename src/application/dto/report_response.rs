use crate::scanning::domain::SeverityTally;

/// ReportResponse - Internal response DTO from the report use case
///
/// Report lines are streamed to the presenter as they are produced; this
/// DTO only carries the run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportResponse {
    /// Number of lists read from the repository directory
    pub repository_lists: usize,
    /// Images pulled and registered during the pull pass
    pub images_pulled: usize,
    /// Images analyzed and written to the report
    pub images_reported: usize,
    /// Findings per severity across every reported image
    pub totals: SeverityTally,
}

impl ReportResponse {
    pub fn total_findings(&self) -> usize {
        self.totals.total()
    }
}
