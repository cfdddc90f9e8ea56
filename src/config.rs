//! Configuration file support for containersec.
//!
//! Provides YAML-based configuration through `containersec.config.yml` files,
//! and resolves the effective settings from CLI flags, the config file and
//! built-in defaults, in that order.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use containersec::prelude::{
    AnchoreClient, DockerProvisioner, PollPolicy, ReportRequest, Result, HEADER_LINES,
};

use crate::cli::Args;

const CONFIG_FILENAME: &str = "containersec.config.yml";

const DEFAULT_REPOS_DIR: &str = "repos";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "foobar";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub repos_dir: Option<PathBuf>,
    pub scanner_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub container_cli: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub max_poll_attempts: Option<u32>,
    pub poll_timeout_secs: Option<u64>,
    pub pull_start_line: Option<usize>,
    pub report_start_line: Option<usize>,
    pub skip_pull: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file deserializes to YAML null
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref url) = config.scanner_url {
        validate_scanner_url(url).context("Invalid config: scanner_url")?;
    }
    if config.poll_interval_ms == Some(0) {
        bail!(
            "Invalid config: poll_interval_ms must be greater than 0.\n\n\
             💡 Hint: Use a pause such as 500 between analysis status checks."
        );
    }
    if config.max_poll_attempts == Some(0) {
        bail!(
            "Invalid config: max_poll_attempts must be greater than 0.\n\n\
             💡 Hint: Remove the field to poll until the scanner finishes."
        );
    }
    if let Some(ref cli) = config.container_cli {
        if cli.trim().is_empty() {
            bail!(
                "Invalid config: container_cli must not be empty.\n\n\
                 💡 Hint: Remove the field to use \"docker\", or set it to e.g. \"podman\"."
            );
        }
    }
    if let Some(line) = config.report_start_line {
        validate_report_start_line(line).context("Invalid config: report_start_line")?;
    }
    Ok(())
}

fn validate_scanner_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        bail!("scanner URL must not be empty");
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!(
            "scanner URL must start with http:// or https://, got '{}'\n\n\
             💡 Hint: Point it at the images API, e.g. {}",
            url,
            AnchoreClient::DEFAULT_IMAGES_URL
        );
    }
    Ok(())
}

fn validate_report_start_line(line: usize) -> Result<()> {
    if line < HEADER_LINES {
        bail!(
            "report start line must be at least {} (lines 0-1 hold repository and tag), got {}",
            HEADER_LINES,
            line
        );
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Loads the config named on the command line, or discovers one in `cwd`.
pub fn load_for_args(args: &Args, cwd: &Path) -> Result<Option<ConfigFile>> {
    match args.config {
        Some(ref path) => load_config_from_path(path).map(Some),
        None => discover_config(cwd),
    }
}

/// Effective settings after merging CLI flags, config file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub repos_dir: PathBuf,
    pub scanner_url: String,
    pub username: String,
    pub password: String,
    pub container_cli: String,
    pub poll_policy: PollPolicy,
    pub pull_start_line: usize,
    pub report_start_line: usize,
    pub skip_pull: bool,
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Merges CLI flags (environment included) over the config file over defaults.
    ///
    /// # Errors
    /// Returns an error if the merged values fail validation
    pub fn resolve(args: Args, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let poll_interval_ms = args
            .poll_interval_ms
            .or(config.poll_interval_ms)
            .unwrap_or(PollPolicy::DEFAULT_INTERVAL.as_millis() as u64);
        if poll_interval_ms == 0 {
            bail!("--poll-interval-ms must be greater than 0");
        }

        let max_poll_attempts = args.max_poll_attempts.or(config.max_poll_attempts);
        if max_poll_attempts == Some(0) {
            bail!("--max-poll-attempts must be greater than 0");
        }

        let poll_policy = PollPolicy::new(Duration::from_millis(poll_interval_ms))
            .with_max_attempts(max_poll_attempts)
            .with_timeout(
                args.poll_timeout_secs
                    .or(config.poll_timeout_secs)
                    .map(Duration::from_secs),
            );

        let scanner_url = args
            .scanner_url
            .or(config.scanner_url)
            .unwrap_or_else(|| AnchoreClient::DEFAULT_IMAGES_URL.to_string());
        validate_scanner_url(&scanner_url)?;

        let report_start_line = args
            .report_start_line
            .or(config.report_start_line)
            .unwrap_or(ReportRequest::DEFAULT_REPORT_START_LINE);
        validate_report_start_line(report_start_line)?;

        Ok(Self {
            repos_dir: args
                .repos_dir
                .or(config.repos_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPOS_DIR)),
            scanner_url,
            username: args
                .username
                .or(config.username)
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: args
                .password
                .or(config.password)
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            container_cli: args
                .container_cli
                .or(config.container_cli)
                .unwrap_or_else(|| DockerProvisioner::DEFAULT_PROGRAM.to_string()),
            poll_policy,
            pull_start_line: args
                .pull_start_line
                .or(config.pull_start_line)
                .unwrap_or(ReportRequest::DEFAULT_PULL_START_LINE),
            report_start_line,
            skip_pull: args.skip_pull || config.skip_pull.unwrap_or(false),
            output: args.output,
        })
    }

    /// Builds the use case request from these settings
    pub fn to_request(&self) -> ReportRequest {
        ReportRequest::new(self.repos_dir.clone())
            .with_poll_policy(self.poll_policy)
            .with_start_lines(self.pull_start_line, self.report_start_line)
            .with_skip_pull(self.skip_pull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write(
            &dir,
            "config.yml",
            r#"
repos_dir: /srv/containersec/repos
scanner_url: http://anchore.internal:8228/v1/images
username: scanner
password: s3cret
container_cli: podman
poll_interval_ms: 1000
max_poll_attempts: 120
poll_timeout_secs: 900
pull_start_line: 2
report_start_line: 2
skip_pull: true
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(
            config.repos_dir,
            Some(PathBuf::from("/srv/containersec/repos"))
        );
        assert_eq!(
            config.scanner_url.as_deref(),
            Some("http://anchore.internal:8228/v1/images")
        );
        assert_eq!(config.username.as_deref(), Some("scanner"));
        assert_eq!(config.password.as_deref(), Some("s3cret"));
        assert_eq!(config.container_cli.as_deref(), Some("podman"));
        assert_eq!(config.poll_interval_ms, Some(1000));
        assert_eq!(config.max_poll_attempts, Some(120));
        assert_eq!(config.poll_timeout_secs, Some(900));
        assert_eq!(config.pull_start_line, Some(2));
        assert_eq!(config.report_start_line, Some(2));
        assert_eq!(config.skip_pull, Some(true));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        write(&dir, CONFIG_FILENAME, "username: ci\n");

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.username.as_deref(), Some("ci"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_empty_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = write(&dir, "config.yml", "\n");
        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.repos_dir.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write(&dir, "bad.yml", "invalid: yaml: [[[broken");

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_scanner_url() {
        let dir = TempDir::new().unwrap();
        let config_path = write(&dir, "config.yml", "scanner_url: localhost:8228\n");

        let err = format!("{:#}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("scanner_url"));
        assert!(err.contains("http:// or https://"));
    }

    #[test]
    fn test_zero_poll_interval() {
        let dir = TempDir::new().unwrap();
        let config_path = write(&dir, "config.yml", "poll_interval_ms: 0\n");

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("poll_interval_ms must be greater than 0"));
    }

    #[test]
    fn test_zero_max_poll_attempts() {
        let dir = TempDir::new().unwrap();
        let config_path = write(&dir, "config.yml", "max_poll_attempts: 0\n");

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("max_poll_attempts must be greater than 0"));
    }

    #[test]
    fn test_report_start_line_inside_header() {
        let dir = TempDir::new().unwrap();
        let config_path = write(&dir, "config.yml", "report_start_line: 1\n");

        let err = format!("{:#}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("report_start_line"));
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = write(
            &dir,
            "config.yml",
            "username: ci\nformat: json\nexclude_packages: [pip]\n",
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("format"));
        assert!(config.unknown_fields.contains_key("exclude_packages"));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(Args::default(), None).unwrap();

        assert_eq!(settings.repos_dir, PathBuf::from("repos"));
        assert_eq!(settings.scanner_url, "http://localhost:8228/v1/images");
        assert_eq!(settings.username, "admin");
        assert_eq!(settings.password, "foobar");
        assert_eq!(settings.container_cli, "docker");
        assert_eq!(settings.poll_policy, PollPolicy::default());
        assert_eq!(settings.pull_start_line, 20);
        assert_eq!(settings.report_start_line, 2);
        assert!(!settings.skip_pull);
        assert!(settings.output.is_none());
    }

    #[test]
    fn test_resolve_config_over_defaults() {
        let config = ConfigFile {
            username: Some("ci".to_string()),
            poll_interval_ms: Some(2000),
            max_poll_attempts: Some(10),
            skip_pull: Some(true),
            ..Default::default()
        };

        let settings = Settings::resolve(Args::default(), Some(config)).unwrap();
        assert_eq!(settings.username, "ci");
        assert_eq!(settings.poll_policy.interval(), Duration::from_secs(2));
        assert_eq!(settings.poll_policy.max_attempts(), Some(10));
        assert!(settings.skip_pull);
    }

    #[test]
    fn test_resolve_cli_over_config() {
        let args = Args {
            username: Some("cli-user".to_string()),
            poll_timeout_secs: Some(30),
            pull_start_line: Some(2),
            ..Default::default()
        };
        let config = ConfigFile {
            username: Some("config-user".to_string()),
            poll_timeout_secs: Some(900),
            pull_start_line: Some(40),
            ..Default::default()
        };

        let settings = Settings::resolve(args, Some(config)).unwrap();
        assert_eq!(settings.username, "cli-user");
        assert_eq!(settings.poll_policy.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(settings.pull_start_line, 2);
    }

    #[test]
    fn test_resolve_rejects_zero_interval_from_cli() {
        let args = Args {
            poll_interval_ms: Some(0),
            ..Default::default()
        };
        assert!(Settings::resolve(args, None).is_err());
    }

    #[test]
    fn test_resolve_rejects_zero_max_attempts_from_cli() {
        let args = Args {
            max_poll_attempts: Some(0),
            ..Default::default()
        };
        let err = Settings::resolve(args, None).unwrap_err().to_string();
        assert!(err.contains("--max-poll-attempts must be greater than 0"));
    }

    #[test]
    fn test_resolve_rejects_bad_url_from_cli() {
        let args = Args {
            scanner_url: Some("ftp://scanner/v1/images".to_string()),
            ..Default::default()
        };
        assert!(Settings::resolve(args, None).is_err());
    }

    #[test]
    fn test_to_request() {
        let args = Args {
            repos_dir: Some(PathBuf::from("/srv/repos")),
            report_start_line: Some(3),
            skip_pull: true,
            ..Default::default()
        };

        let request = Settings::resolve(args, None).unwrap().to_request();
        assert_eq!(request.repos_dir, PathBuf::from("/srv/repos"));
        assert_eq!(request.pull_start_line, 20);
        assert_eq!(request.report_start_line, 3);
        assert!(request.skip_pull);
    }

    #[test]
    fn test_load_for_args_prefers_explicit_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, CONFIG_FILENAME, "username: discovered\n");
        let explicit = write(&dir, "other.yml", "username: explicit\n");

        let args = Args {
            config: Some(explicit),
            ..Default::default()
        };
        let config = load_for_args(&args, dir.path()).unwrap().unwrap();
        assert_eq!(config.username.as_deref(), Some("explicit"));

        let discovered = load_for_args(&Args::default(), dir.path()).unwrap().unwrap();
        assert_eq!(discovered.username.as_deref(), Some("discovered"));
    }
}
