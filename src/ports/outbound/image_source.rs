use crate::scanning::domain::RepositoryList;
use crate::shared::Result;
use std::path::Path;

/// ImageSource port for reading the repository lists to scan
///
/// This port abstracts where the repo/tag/digest lists come from.
pub trait ImageSource {
    /// Reads every repository list found in the given directory
    ///
    /// # Arguments
    /// * `repos_dir` - Directory holding one list per file
    ///
    /// # Returns
    /// The parsed lists, in a stable (file name) order
    ///
    /// # Errors
    /// Returns an error if:
    /// - The directory does not exist or cannot be listed
    /// - A list file cannot be read
    /// - A list file lacks the repository/tag header
    fn read_repository_lists(&self, repos_dir: &Path) -> Result<Vec<RepositoryList>>;
}
