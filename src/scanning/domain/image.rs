use crate::shared::error::ScanError;
use crate::shared::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

/// Maximum length for repository names and tags (security limit)
const MAX_NAME_LENGTH: usize = 255;

/// Maximum length for digests (security limit)
const MAX_DIGEST_LENGTH: usize = 255;

fn validate_component(value: &str, what: &str, max_len: usize) -> Result<()> {
    if value.is_empty() {
        return Err(ScanError::Validation {
            message: format!("{} cannot be empty", what),
        }
        .into());
    }

    if value.len() > max_len {
        return Err(ScanError::Validation {
            message: format!(
                "{} is too long ({} bytes). Maximum allowed: {} bytes",
                what,
                value.len(),
                max_len
            ),
        }
        .into());
    }

    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ScanError::Validation {
            message: format!("{} must not contain whitespace: {:?}", what, value),
        }
        .into());
    }

    Ok(())
}

/// Repository and digest of an image whose creation time is not known yet
///
/// Renders as `repository@digest`, the form the container CLI accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference {
    repository: String,
    digest: String,
}

impl ImageReference {
    pub fn new(repository: impl Into<String>, digest: impl Into<String>) -> Result<Self> {
        let repository = repository.into();
        let digest = digest.into();
        validate_component(&repository, "Repository", MAX_NAME_LENGTH)?;
        validate_component(&digest, "Digest", MAX_DIGEST_LENGTH)?;
        Ok(Self { repository, digest })
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repository, self.digest)
    }
}

/// Identifies one scan target
///
/// Built once per (repository, tag, digest) triple and never mutated.
/// The digest identifies content; `repository:tag` is only a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    reference: ImageReference,
    tag: String,
    created_at: String,
}

impl ImageDescriptor {
    pub fn new(reference: ImageReference, tag: impl Into<String>, created_at: String) -> Result<Self> {
        let tag = tag.into();
        validate_component(&tag, "Tag", MAX_NAME_LENGTH)?;
        if created_at.trim().is_empty() {
            return Err(ScanError::Validation {
                message: format!("Creation timestamp for {} cannot be empty", reference),
            }
            .into());
        }
        Ok(Self {
            reference,
            tag,
            created_at,
        })
    }

    pub fn repository(&self) -> &str {
        self.reference.repository()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn digest(&self) -> &str {
        self.reference.digest()
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn reference(&self) -> &ImageReference {
        &self.reference
    }

    /// Human label `repository:tag`
    pub fn label(&self) -> String {
        format!("{}:{}", self.repository(), self.tag)
    }

    /// Registration payload sent to the scanner
    pub fn to_registration(&self) -> ImageRegistration {
        ImageRegistration {
            tag: self.label(),
            digest: self.digest().to_string(),
            created_at: self.created_at.clone(),
        }
    }
}

impl fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference)
    }
}

/// Body of the scanner's image registration call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRegistration {
    pub tag: String,
    pub digest: String,
    pub created_at: String,
}

/// Normalizes `inspect --format={{.Created}}` output to second precision
///
/// Takes the last non-empty line, cuts it before the first `.` and appends
/// `Z`. Lines without a fractional part are parsed as RFC 3339 instead.
/// Returns `None` when no usable timestamp is present.
pub fn normalize_created_at(inspect_output: &str) -> Option<String> {
    let line = inspect_output
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())?;

    if let Some((seconds, _fraction)) = line.split_once('.') {
        if seconds.is_empty() {
            return None;
        }
        return Some(format!("{}Z", seconds));
    }

    DateTime::parse_from_rfc3339(line)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true))
}
