use crate::scanning::domain::ImageReference;
use crate::shared::Result;
use async_trait::async_trait;

/// ImageProvisioner port for making images available locally
///
/// This port abstracts the container CLI used to pull images by digest
/// and to read their creation time.
#[async_trait]
pub trait ImageProvisioner: Send + Sync {
    /// Pulls `repository@digest`
    ///
    /// # Errors
    /// Returns `ScanError::Provision` if the pull command cannot be run or
    /// exits with a non-zero status
    async fn pull(&self, image: &ImageReference) -> Result<()>;

    /// Reads the image creation time as second-precision UTC text ending in `Z`
    ///
    /// # Errors
    /// Returns `ScanError::Provision` if the inspect command fails or its
    /// output holds no usable timestamp
    async fn created_at(&self, image: &ImageReference) -> Result<String>;
}
