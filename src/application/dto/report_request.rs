use crate::scanning::domain::HEADER_LINES;
use crate::scanning::policies::PollPolicy;
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::path::PathBuf;

/// ReportRequest - Internal request DTO for the report use case
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Directory holding one repository list per file
    pub repos_dir: PathBuf,
    /// How long to keep polling each image during the report pass
    pub poll_policy: PollPolicy,
    /// First line (0-based) of each list that the pull pass treats as a digest
    pub pull_start_line: usize,
    /// First line (0-based) of each list that the report pass treats as a digest
    pub report_start_line: usize,
    /// Skip the pull pass entirely
    pub skip_pull: bool,
}

impl ReportRequest {
    /// The pull pass has always started at line 20 while the report pass
    /// starts right after the header. Kept separate until the intended
    /// pull offset is confirmed.
    pub const DEFAULT_PULL_START_LINE: usize = 20;
    pub const DEFAULT_REPORT_START_LINE: usize = HEADER_LINES;

    pub fn new(repos_dir: PathBuf) -> Self {
        Self {
            repos_dir,
            poll_policy: PollPolicy::default(),
            pull_start_line: Self::DEFAULT_PULL_START_LINE,
            report_start_line: Self::DEFAULT_REPORT_START_LINE,
            skip_pull: false,
        }
    }

    pub fn with_poll_policy(mut self, poll_policy: PollPolicy) -> Self {
        self.poll_policy = poll_policy;
        self
    }

    pub fn with_start_lines(mut self, pull_start_line: usize, report_start_line: usize) -> Self {
        self.pull_start_line = pull_start_line;
        self.report_start_line = report_start_line;
        self
    }

    pub fn with_skip_pull(mut self, skip_pull: bool) -> Self {
        self.skip_pull = skip_pull;
        self
    }

    /// Rejects start lines that would read the repository/tag header as digests
    pub fn validate(&self) -> Result<()> {
        for (name, line) in [
            ("pull start line", self.pull_start_line),
            ("report start line", self.report_start_line),
        ] {
            if line < HEADER_LINES {
                return Err(ScanError::Validation {
                    message: format!(
                        "{} must be at least {} (lines 0-1 hold repository and tag), got {}",
                        name, HEADER_LINES, line
                    ),
                }
                .into());
            }
        }
        Ok(())
    }
}
