use crate::ports::outbound::OutputPresenter;
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::cell::Cell;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing the report to a file
///
/// The file is created (or truncated) on the first presented line, so a
/// run that aborts before the report starts leaves no file behind.
pub struct FileSystemWriter {
    output_path: PathBuf,
    started: Cell<bool>,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            started: Cell::new(false),
        }
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.exists() && parent != Path::new("") {
                return Err(ScanError::FileWriteError {
                    path: self.output_path.clone(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Rejects an existing output path that is a symbolic link
    fn validate_output_security(&self) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(&self.output_path) {
            if metadata.is_symlink() {
                return Err(ScanError::FileWriteError {
                    path: self.output_path.clone(),
                    details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn write_error(&self, e: io::Error) -> anyhow::Error {
        ScanError::FileWriteError {
            path: self.output_path.clone(),
            details: e.to_string(),
        }
        .into()
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, line: &str) -> Result<()> {
        let first = !self.started.get();
        if first {
            self.validate_parent_directory()?;
            self.validate_output_security()?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(first)
            .append(!first)
            .open(&self.output_path)
            .map_err(|e| self.write_error(e))?;

        writeln!(file, "{}", line).map_err(|e| self.write_error(e))?;
        self.started.set(true);
        Ok(())
    }
}

/// StdoutPresenter adapter for writing the report to stdout
///
/// Each line is flushed immediately.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, line: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)
            .and_then(|_| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
