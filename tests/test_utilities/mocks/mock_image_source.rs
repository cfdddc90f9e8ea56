use containersec::prelude::*;
use std::path::Path;

/// Mock ImageSource serving repository lists parsed from in-memory text
pub struct MockImageSource {
    files: Vec<(String, String)>,
}

impl MockImageSource {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds one list file; lists are returned in insertion order
    pub fn with_list(mut self, name: &str, content: &str) -> Self {
        self.files.push((name.to_string(), content.to_string()));
        self
    }
}

impl Default for MockImageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for MockImageSource {
    fn read_repository_lists(&self, repos_dir: &Path) -> Result<Vec<RepositoryList>> {
        self.files
            .iter()
            .map(|(name, content)| RepositoryList::parse(&repos_dir.join(name), content))
            .collect()
    }
}
