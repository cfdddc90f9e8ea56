use crate::scanning::domain::{ImageDescriptor, Severity, SeverityTally};

/// ReportRenderer service for producing CSV report lines
///
/// Pure text production; writing the lines is left to an `OutputPresenter`.
pub struct ReportRenderer;

impl ReportRenderer {
    /// Header row: `Repo,Tag,Timestamp,<severities>,Digest`
    pub fn header() -> String {
        let severities: Vec<&str> = Severity::ALL.iter().map(|s| s.as_str()).collect();
        format!("Repo,Tag,Timestamp,{},Digest", severities.join(","))
    }

    /// One report row: `repo,tag,shortDate,<counts>,repo@digest`
    pub fn render_row(image: &ImageDescriptor, tally: &SeverityTally) -> String {
        let counts: Vec<String> = tally.iter().map(|(_, count)| count.to_string()).collect();
        format!(
            "{},{},{},{},{}",
            image.repository(),
            image.tag(),
            Self::short_date(image.created_at()),
            counts.join(","),
            image.reference()
        )
    }

    /// Date portion of a timestamp: everything before the first `T`
    ///
    /// Timestamps without a `T` are returned unchanged.
    pub fn short_date(created_at: &str) -> &str {
        created_at
            .split_once('T')
            .map_or(created_at, |(date, _)| date)
    }
}
