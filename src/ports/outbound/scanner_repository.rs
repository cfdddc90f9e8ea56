use crate::scanning::domain::{AnalysisStatus, Finding, ImageDescriptor};
use crate::scanning::policies::PollPolicy;
use crate::shared::error::ScanError;
use crate::shared::Result;
use async_trait::async_trait;
use tokio::time::Instant;

/// Callback invoked after every attempt that did not end in `analyzed`
///
/// Receives the 1-based attempt number and the status the scanner reported.
pub type PollProgressCallback<'a> = &'a (dyn Fn(u32, &AnalysisStatus) + Send + Sync);

/// ScannerRepository port for the image analysis service
///
/// This port abstracts the scanner API that analyzes registered images
/// and lists their vulnerabilities.
///
/// # Async Support
/// All methods are async. Implementations must be `Send + Sync`.
#[async_trait]
pub trait ScannerRepository: Send + Sync {
    /// Registers an image (or re-registers it) and returns its analysis status
    ///
    /// Registration is idempotent: repeating it for the same digest is how
    /// callers poll for progress.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The request cannot be sent or returns a non-success status
    /// - The response has no analysis status in the expected place
    async fn register(&self, image: &ImageDescriptor) -> Result<AnalysisStatus>;

    /// Fetches every vulnerability finding for an analyzed image
    ///
    /// # Errors
    /// Returns an error if the request fails or the response has no
    /// `vulnerabilities` list
    async fn fetch_findings(&self, image: &ImageDescriptor) -> Result<Vec<Finding>>;

    /// Registers the image repeatedly until the scanner reports `analyzed`
    ///
    /// Waits `policy.interval()` between attempts. With an unbounded policy
    /// this never gives up while the scanner keeps answering.
    ///
    /// # Arguments
    /// * `image` - Image to wait for
    /// * `policy` - Interval and optional attempt/time limits
    /// * `on_pending` - Called after each non-terminal attempt
    ///
    /// # Returns
    /// The number of registration calls made, including the final one
    ///
    /// # Errors
    /// Returns `ScanError::PollLimitExceeded` when the policy allows no
    /// further attempt, and propagates any error from `register`
    async fn wait_until_analyzed(
        &self,
        image: &ImageDescriptor,
        policy: &PollPolicy,
        on_pending: PollProgressCallback<'_>,
    ) -> Result<u32> {
        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            let status = self.register(image).await?;
            attempts = attempts.saturating_add(1);

            if status.is_analyzed() {
                return Ok(attempts);
            }
            on_pending(attempts, &status);

            if !policy.allows_another_attempt(attempts, started.elapsed()) {
                return Err(ScanError::PollLimitExceeded {
                    image: image.reference().to_string(),
                    attempts,
                }
                .into());
            }
            tokio::time::sleep(policy.interval()).await;
        }
    }
}
