use crate::ports::outbound::ImageProvisioner;
use crate::scanning::domain::{normalize_created_at, ImageReference};
use crate::shared::error::ScanError;
use crate::shared::Result;
use async_trait::async_trait;
use std::process::Output;
use tokio::process::Command;

/// DockerProvisioner adapter driving a docker-compatible CLI
///
/// Runs `<program> [args..] pull <repo>@<digest>` and
/// `<program> [args..] inspect --format={{.Created}} <repo>@<digest>`.
/// Leading args allow wrappers such as `sudo docker` or `podman --remote`.
pub struct DockerProvisioner {
    program: String,
    leading_args: Vec<String>,
}

impl DockerProvisioner {
    pub const DEFAULT_PROGRAM: &'static str = "docker";

    pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    /// Builds a provisioner from a command line such as `"sudo docker"`
    ///
    /// # Errors
    /// Returns an error if the command line is blank
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(String::from);
        let program = parts.next().ok_or_else(|| ScanError::Validation {
            message: "Container CLI command must not be empty".to_string(),
        })?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, image: &ImageReference, args: &[&str]) -> Result<Output> {
        let reference = image.to_string();
        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(args)
            .arg(&reference)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ScanError::Provision {
                image: reference.clone(),
                details: format!("failed to run '{}': {}", self.program, e),
            })?;

        if !output.status.success() {
            return Err(ScanError::Provision {
                image: reference,
                details: format!(
                    "'{} {}' exited with {}: {}",
                    self.program,
                    args.join(" "),
                    output.status,
                    last_lines(&String::from_utf8_lossy(&output.stderr), 5)
                ),
            }
            .into());
        }

        Ok(output)
    }
}

impl Default for DockerProvisioner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM, Vec::new())
    }
}

#[async_trait]
impl ImageProvisioner for DockerProvisioner {
    async fn pull(&self, image: &ImageReference) -> Result<()> {
        self.run(image, &["pull"]).await?;
        Ok(())
    }

    async fn created_at(&self, image: &ImageReference) -> Result<String> {
        let output = self.run(image, &["inspect", "--format={{.Created}}"]).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        normalize_created_at(&stdout).ok_or_else(|| {
            ScanError::Provision {
                image: image.to_string(),
                details: format!(
                    "inspect printed no creation timestamp: {:?}",
                    last_lines(&stdout, 1)
                ),
            }
            .into()
        })
    }
}

/// Last `n` non-empty lines of command output, joined with " | "
fn last_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    lines[lines.len().saturating_sub(n)..].join(" | ")
}
