use async_trait::async_trait;
use containersec::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Mock ScannerRepository with scripted statuses and canned findings
///
/// Each digest answers its scripted statuses in order and `analyzed`
/// once the script runs out.
#[derive(Clone, Default)]
pub struct MockScannerRepository {
    scripts: Arc<Mutex<HashMap<String, VecDeque<String>>>>,
    findings: HashMap<String, Vec<Finding>>,
    pub registrations: Arc<Mutex<Vec<ImageDescriptor>>>,
    should_fail: bool,
}

impl MockScannerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(self, digest: &str, statuses: &[&str]) -> Self {
        self.scripts.lock().unwrap().insert(
            digest.to_string(),
            statuses.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn with_findings(mut self, digest: &str, severities: &[Severity]) -> Self {
        let findings = severities
            .iter()
            .enumerate()
            .map(|(i, s)| Finding::new(format!("CVE-2024-{:04}", i), *s))
            .collect();
        self.findings.insert(digest.to_string(), findings);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn get_registrations(&self) -> Vec<ImageDescriptor> {
        self.registrations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScannerRepository for MockScannerRepository {
    async fn register(&self, image: &ImageDescriptor) -> Result<AnalysisStatus> {
        if self.should_fail {
            return Err(ScanError::Transport {
                endpoint: "http://localhost:8228/v1/images".to_string(),
                details: "Mock scanner failure".to_string(),
            }
            .into());
        }

        self.registrations.lock().unwrap().push(image.clone());
        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(image.digest())
            .and_then(VecDeque::pop_front);

        Ok(match next {
            Some(text) => AnalysisStatus::from_status_text(&text),
            None => AnalysisStatus::Analyzed,
        })
    }

    async fn fetch_findings(&self, image: &ImageDescriptor) -> Result<Vec<Finding>> {
        Ok(self
            .findings
            .get(image.digest())
            .cloned()
            .unwrap_or_default())
    }
}
