use crate::ports::outbound::ImageSource;
use crate::scanning::domain::RepositoryList;
use crate::shared::error::ScanError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// RepositoryListReader adapter for reading repository lists from a directory
///
/// Every regular file in the directory is one list. Hidden files (leading
/// `.`) and subdirectories are ignored; files are returned in name order.
pub struct RepositoryListReader;

impl RepositoryListReader {
    pub fn new() -> Self {
        Self
    }

    fn validate_directory(&self, repos_dir: &Path) -> Result<()> {
        let metadata = fs::symlink_metadata(repos_dir).map_err(|e| ScanError::InvalidReposDir {
            path: repos_dir.to_path_buf(),
            reason: format!("Directory does not exist or cannot be read: {}", e),
        })?;

        if metadata.is_symlink() {
            return Err(ScanError::InvalidReposDir {
                path: repos_dir.to_path_buf(),
                reason: "Security: Repository directory is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
            }
            .into());
        }

        if !metadata.is_dir() {
            return Err(ScanError::InvalidReposDir {
                path: repos_dir.to_path_buf(),
                reason: "Not a directory".to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn list_files(&self, repos_dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(repos_dir).map_err(|e| ScanError::InvalidReposDir {
            path: repos_dir.to_path_buf(),
            reason: format!("Failed to list directory: {}", e),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if hidden || entry.file_type()?.is_dir() {
                continue;
            }
            files.push(entry.path());
        }

        files.sort();
        Ok(files)
    }

    fn read_list(&self, path: &Path) -> Result<RepositoryList> {
        validate_regular_file(path, "repository list")?;
        let content = fs::read_to_string(path).map_err(|e| ScanError::Input {
            path: path.to_path_buf(),
            reason: format!("failed to read file: {}", e),
        })?;
        RepositoryList::parse(path, &content)
    }
}

impl Default for RepositoryListReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for RepositoryListReader {
    fn read_repository_lists(&self, repos_dir: &Path) -> Result<Vec<RepositoryList>> {
        self.validate_directory(repos_dir)?;

        self.list_files(repos_dir)?
            .iter()
            .map(|path| self.read_list(path))
            .collect()
    }
}
