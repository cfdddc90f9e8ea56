use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every image was analyzed and reported
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (scanner error, pull failure, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for image scanning.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The container CLI failed to pull or inspect an image
    #[error("Container command failed for {image}\nDetails: {details}\n\n💡 Hint: Check that the container CLI is installed, the daemon is running and the digest exists in the registry")]
    Provision { image: String, details: String },

    /// Network or HTTP-level failure while talking to the scanner
    #[error("Scanner request failed: {endpoint}\nDetails: {details}\n\n💡 Hint: Verify that the scanner service is reachable and the credentials are correct")]
    Transport { endpoint: String, details: String },

    /// The scanner answered with an unexpected payload shape
    #[error("Unexpected scanner response from {endpoint}\nDetails: {details}\n\n💡 Hint: Make sure the scanner URL points at the /v1/images API")]
    Protocol { endpoint: String, details: String },

    /// A repository list file does not follow the repo/tag/digest layout
    #[error("Invalid repository list: {path}\nReason: {reason}\n\n💡 Hint: Line 1 must hold the repository, line 2 the tag, and every following line one digest")]
    Input { path: PathBuf, reason: String },

    /// The configured polling limit ran out before analysis finished
    #[error("Analysis of {image} did not finish after {attempts} attempt(s)\n\n💡 Hint: Raise --max-poll-attempts / --poll-timeout-secs or check the scanner's analysis queue")]
    PollLimitExceeded { image: String, attempts: u32 },

    #[error("Invalid repository directory: {path}\nReason: {reason}\n\n💡 Hint: Please specify a directory containing one repository list per file")]
    InvalidReposDir { path: PathBuf, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for value objects and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
