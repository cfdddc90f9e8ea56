use super::Severity;
use serde::Deserialize;

/// A single vulnerability record returned by the scanner
///
/// Only `severity` drives the report; the remaining fields are carried
/// along for diagnostics. Absent fields deserialize to defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Finding {
    #[serde(default)]
    severity: Severity,
    #[serde(default, rename = "vuln")]
    identifier: String,
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    package_version: Option<String>,
    #[serde(default)]
    fix: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl Finding {
    pub fn new(identifier: impl Into<String>, severity: Severity) -> Self {
        Self {
            severity,
            identifier: identifier.into(),
            package: None,
            package_version: None,
            fix: None,
            url: None,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn package_version(&self) -> Option<&str> {
        self.package_version.as_deref()
    }

    /// Fixed-in version; the scanner reports `"None"` when there is no fix
    pub fn fix(&self) -> Option<&str> {
        self.fix.as_deref().filter(|f| !f.eq_ignore_ascii_case("none"))
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "vuln": "CVE-2023-0001",
            "severity": "High",
            "package": "openssl-1.1.1k",
            "package_version": "1.1.1k",
            "fix": "1.1.1t",
            "url": "https://security-tracker.debian.org/tracker/CVE-2023-0001",
            "feed": "vulnerabilities",
            "feed_group": "debian:11"
        }"#;
        let finding: Finding = serde_json::from_str(json).unwrap();
        assert_eq!(finding.identifier(), "CVE-2023-0001");
        assert_eq!(finding.severity(), Severity::High);
        assert_eq!(finding.package(), Some("openssl-1.1.1k"));
        assert_eq!(finding.package_version(), Some("1.1.1k"));
        assert_eq!(finding.fix(), Some("1.1.1t"));
        assert!(finding.url().unwrap().contains("CVE-2023-0001"));
    }

    #[test]
    fn test_deserialize_severity_only() {
        let finding: Finding = serde_json::from_str(r#"{"severity": "Low"}"#).unwrap();
        assert_eq!(finding.severity(), Severity::Low);
        assert_eq!(finding.identifier(), "");
        assert!(finding.package().is_none());
    }

    #[test]
    fn test_missing_severity_is_unknown() {
        let finding: Finding = serde_json::from_str(r#"{"vuln": "CVE-1"}"#).unwrap();
        assert_eq!(finding.severity(), Severity::Unknown);
    }

    #[test]
    fn test_fix_none_literal() {
        let finding: Finding =
            serde_json::from_str(r#"{"severity": "Low", "fix": "None"}"#).unwrap();
        assert!(finding.fix().is_none());
    }
}
