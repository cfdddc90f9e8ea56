use clap::Parser;
use std::path::PathBuf;

/// Pull container images, wait for a scanner to analyze them and report
/// vulnerability counts per severity as CSV
///
/// Options left unset fall back to `containersec.config.yml` and then to
/// built-in defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "containersec")]
#[command(version)]
#[command(
    about = "Container image vulnerability report generator for Anchore-style scanners",
    long_about = None
)]
pub struct Args {
    /// Directory holding one repository list per file
    /// (line 1: repository, line 2: tag, then one digest per line)
    #[arg(short = 'd', long, env = "CONTAINERSEC_REPOS_DIR", value_name = "DIR")]
    pub repos_dir: Option<PathBuf>,

    /// Scanner images endpoint [default: http://localhost:8228/v1/images]
    #[arg(long, env = "CONTAINERSEC_SCANNER_URL", value_name = "URL")]
    pub scanner_url: Option<String>,

    /// Scanner username for HTTP Basic authentication [default: admin]
    #[arg(long, env = "CONTAINERSEC_USERNAME")]
    pub username: Option<String>,

    /// Scanner password for HTTP Basic authentication
    #[arg(long, env = "CONTAINERSEC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Container CLI used to pull and inspect images, e.g. "podman" or "sudo docker"
    /// [default: docker]
    #[arg(long, value_name = "COMMAND")]
    pub container_cli: Option<String>,

    /// Pause between analysis status checks, in milliseconds [default: 500]
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Give up on an image after this many status checks (unlimited if unset)
    #[arg(long, value_name = "N")]
    pub max_poll_attempts: Option<u32>,

    /// Give up on an image after polling this long, in seconds (unlimited if unset)
    #[arg(long, value_name = "SECS")]
    pub poll_timeout_secs: Option<u64>,

    /// First line (0-based) of each list pulled in the pull pass [default: 20]
    #[arg(long, value_name = "LINE")]
    pub pull_start_line: Option<usize>,

    /// First line (0-based) of each list reported in the report pass [default: 2]
    #[arg(long, value_name = "LINE")]
    pub report_start_line: Option<usize>,

    /// Skip the pull pass and report on images that are already registered
    #[arg(long)]
    pub skip_pull: bool,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to a config file (defaults to ./containersec.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parses arguments, leaving usage errors to the caller
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("containersec").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_arguments() {
        let args = parse(&[]).unwrap();
        assert!(args.output.is_none());
        assert!(args.config.is_none());
        assert!(!args.skip_pull);
        assert!(args.max_poll_attempts.is_none());
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&["-d", "/srv/repos", "-o", "report.csv", "-c", "ci.yml"]).unwrap();
        assert_eq!(args.repos_dir, Some(PathBuf::from("/srv/repos")));
        assert_eq!(args.output, Some(PathBuf::from("report.csv")));
        assert_eq!(args.config, Some(PathBuf::from("ci.yml")));
    }

    #[test]
    fn test_polling_flags() {
        let args = parse(&[
            "--poll-interval-ms",
            "250",
            "--max-poll-attempts",
            "40",
            "--poll-timeout-secs",
            "600",
        ])
        .unwrap();
        assert_eq!(args.poll_interval_ms, Some(250));
        assert_eq!(args.max_poll_attempts, Some(40));
        assert_eq!(args.poll_timeout_secs, Some(600));
    }

    #[test]
    fn test_start_lines_and_skip_pull() {
        let args = parse(&[
            "--pull-start-line",
            "2",
            "--report-start-line",
            "5",
            "--skip-pull",
        ])
        .unwrap();
        assert_eq!(args.pull_start_line, Some(2));
        assert_eq!(args.report_start_line, Some(5));
        assert!(args.skip_pull);
    }

    #[test]
    fn test_container_cli_with_wrapper() {
        let args = parse(&["--container-cli", "sudo docker"]).unwrap();
        assert_eq!(args.container_cli.as_deref(), Some("sudo docker"));
    }

    #[test]
    fn test_invalid_number_is_usage_error() {
        let err = parse(&["--poll-interval-ms", "soon"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let err = parse(&["--format", "json"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
