use async_trait::async_trait;
use containersec::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock ImageProvisioner recording pulls and answering creation times
#[derive(Clone)]
pub struct MockImageProvisioner {
    pub pulled: Arc<Mutex<Vec<String>>>,
    created_at: HashMap<String, String>,
    default_created_at: String,
    failing_pulls: Vec<String>,
}

impl MockImageProvisioner {
    pub fn new() -> Self {
        Self {
            pulled: Arc::new(Mutex::new(Vec::new())),
            created_at: HashMap::new(),
            default_created_at: "2023-05-01T12:00:00Z".to_string(),
            failing_pulls: Vec::new(),
        }
    }

    /// Sets the creation time reported for one digest
    pub fn with_created_at(mut self, digest: &str, created_at: &str) -> Self {
        self.created_at
            .insert(digest.to_string(), created_at.to_string());
        self
    }

    /// Makes the pull of `repository@digest` fail
    pub fn with_failing_pull(mut self, reference: &str) -> Self {
        self.failing_pulls.push(reference.to_string());
        self
    }

    pub fn get_pulled(&self) -> Vec<String> {
        self.pulled.lock().unwrap().clone()
    }
}

impl Default for MockImageProvisioner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProvisioner for MockImageProvisioner {
    async fn pull(&self, image: &ImageReference) -> Result<()> {
        let reference = image.to_string();
        if self.failing_pulls.contains(&reference) {
            return Err(ScanError::Provision {
                image: reference,
                details: "Mock pull failure".to_string(),
            }
            .into());
        }
        self.pulled.lock().unwrap().push(reference);
        Ok(())
    }

    async fn created_at(&self, image: &ImageReference) -> Result<String> {
        Ok(self
            .created_at
            .get(image.digest())
            .cloned()
            .unwrap_or_else(|| self.default_created_at.clone()))
    }
}
