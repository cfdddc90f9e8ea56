use super::ImageReference;
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Number of header lines (repository, tag) at the top of every list
pub const HEADER_LINES: usize = 2;

/// One parsed repository list file
///
/// Line 0 holds the repository, line 1 the tag and every following line
/// one digest. All raw lines are kept so each pass can choose its own
/// starting line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryList {
    source: PathBuf,
    repository: String,
    tag: String,
    lines: Vec<String>,
}

impl RepositoryList {
    /// Parses the text of a repository list
    ///
    /// # Errors
    /// Returns `ScanError::Input` if the repository or tag line is missing
    /// or blank.
    pub fn parse(source: &Path, content: &str) -> Result<Self> {
        let lines: Vec<String> = content.lines().map(|l| l.trim().to_string()).collect();

        if lines.len() < HEADER_LINES {
            return Err(ScanError::Input {
                path: source.to_path_buf(),
                reason: format!(
                    "expected at least {} header lines (repository, tag), found {}",
                    HEADER_LINES,
                    lines.len()
                ),
            }
            .into());
        }

        let repository = lines[0].clone();
        let tag = lines[1].clone();

        if repository.is_empty() {
            return Err(ScanError::Input {
                path: source.to_path_buf(),
                reason: "repository line is blank".to_string(),
            }
            .into());
        }
        if tag.is_empty() {
            return Err(ScanError::Input {
                path: source.to_path_buf(),
                reason: "tag line is blank".to_string(),
            }
            .into());
        }

        Ok(Self {
            source: source.to_path_buf(),
            repository,
            tag,
            lines,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Total number of lines, header included
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Image references for the lines starting at `start_line`
    ///
    /// Blank lines are skipped. A `start_line` past the end yields nothing.
    ///
    /// # Errors
    /// Returns `ScanError::Input` naming the line when a digest is invalid.
    pub fn references_from(&self, start_line: usize) -> Result<Vec<ImageReference>> {
        self.lines
            .iter()
            .enumerate()
            .skip(start_line)
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, digest)| {
                ImageReference::new(self.repository.clone(), digest.clone()).map_err(|e| {
                    ScanError::Input {
                        path: self.source.clone(),
                        reason: format!("line {}: {}", idx + 1, e),
                    }
                    .into()
                })
            })
            .collect()
    }
}
