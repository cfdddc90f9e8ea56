use crate::ports::outbound::ScannerRepository;
use crate::scanning::domain::{AnalysisStatus, Finding, ImageDescriptor};
use crate::shared::error::ScanError;
use crate::shared::security::validate_path_segment;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// HTTP Basic credentials for the scanner API
#[derive(Clone, PartialEq, Eq)]
pub struct ScannerCredentials {
    username: String,
    password: String,
}

impl ScannerCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for ScannerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScannerCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Client for an Anchore-style image analysis API
///
/// Talks to `{images_url}` (for example `http://localhost:8228/v1/images`):
/// - `POST {images_url}` registers an image and reports its analysis status
/// - `GET {images_url}/{digest}/vuln/all` lists its vulnerabilities
///
/// One `reqwest::Client` is built up front and shared by every call.
#[derive(Clone)]
pub struct AnchoreClient {
    client: reqwest::Client,
    images_url: String,
    credentials: ScannerCredentials,
}

impl AnchoreClient {
    pub const DEFAULT_IMAGES_URL: &'static str = "http://localhost:8228/v1/images";
    const TIMEOUT_SECONDS: u64 = 30;

    /// Creates a client for the given images endpoint
    ///
    /// # Errors
    /// Returns an error if the URL is not http(s) or the HTTP client cannot be built
    pub fn new(images_url: &str, credentials: ScannerCredentials) -> Result<Self> {
        let images_url = images_url.trim().trim_end_matches('/').to_string();
        if !(images_url.starts_with("http://") || images_url.starts_with("https://")) {
            return Err(ScanError::Validation {
                message: format!(
                    "Scanner URL must start with http:// or https://, got '{}'",
                    images_url
                ),
            }
            .into());
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("containersec/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            images_url,
            credentials,
        })
    }

    pub fn images_url(&self) -> &str {
        &self.images_url
    }

    fn vulnerabilities_url(&self, digest: &str) -> Result<String> {
        validate_path_segment(digest, "Digest")?;
        Ok(format!("{}/{}/vuln/all", self.images_url, digest))
    }

    /// Sends a prepared request and returns the body of a successful response
    async fn send(&self, request: reqwest::RequestBuilder, endpoint: &str) -> Result<String> {
        let response = request
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await
            .map_err(|e| ScanError::Transport {
                endpoint: endpoint.to_string(),
                details: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ScanError::Transport {
            endpoint: endpoint.to_string(),
            details: format!("failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            return Err(ScanError::Transport {
                endpoint: endpoint.to_string(),
                details: format!("HTTP {}: {}", status, truncate(&body, 200)),
            }
            .into());
        }

        Ok(body)
    }

    /// Extracts the analysis status from a registration response
    ///
    /// Expects a JSON array whose first element carries `analysis_status`.
    fn parse_registration_response(endpoint: &str, body: &str) -> Result<AnalysisStatus> {
        let protocol = |details: String| ScanError::Protocol {
            endpoint: endpoint.to_string(),
            details,
        };

        let value: Value = serde_json::from_str(body)
            .map_err(|e| protocol(format!("response is not valid JSON: {}", e)))?;

        let records = value
            .as_array()
            .ok_or_else(|| protocol("expected a JSON array of image records".to_string()))?;

        let first = records
            .first()
            .ok_or_else(|| protocol("image record array is empty".to_string()))?;

        let status = first
            .get("analysis_status")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                protocol("first image record has no string 'analysis_status' field".to_string())
            })?;

        Ok(AnalysisStatus::from_status_text(status))
    }

    /// Extracts findings from a `vuln/all` response
    ///
    /// Expects a JSON object with a `vulnerabilities` array.
    fn parse_findings_response(endpoint: &str, body: &str) -> Result<Vec<Finding>> {
        let protocol = |details: String| ScanError::Protocol {
            endpoint: endpoint.to_string(),
            details,
        };

        let value: Value = serde_json::from_str(body)
            .map_err(|e| protocol(format!("response is not valid JSON: {}", e)))?;

        if !value.is_object() {
            return Err(protocol("expected a JSON object".to_string()).into());
        }

        let vulnerabilities = value
            .get("vulnerabilities")
            .and_then(Value::as_array)
            .ok_or_else(|| protocol("missing 'vulnerabilities' array".to_string()))?;

        vulnerabilities
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Finding::deserialize(v)
                    .map_err(|e| protocol(format!("vulnerabilities[{}]: {}", i, e)).into())
            })
            .collect()
    }
}

#[async_trait]
impl ScannerRepository for AnchoreClient {
    async fn register(&self, image: &ImageDescriptor) -> Result<AnalysisStatus> {
        let request = self
            .client
            .post(&self.images_url)
            .json(&image.to_registration());
        let body = self.send(request, &self.images_url).await?;
        Self::parse_registration_response(&self.images_url, &body)
    }

    async fn fetch_findings(&self, image: &ImageDescriptor) -> Result<Vec<Finding>> {
        let url = self.vulnerabilities_url(image.digest())?;
        let body = self.send(self.client.get(&url), &url).await?;
        Self::parse_findings_response(&url, &body)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push('…');
    }
    out
}
