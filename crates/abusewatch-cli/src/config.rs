//! Configuration management.

use anyhow::{Context, Result};
use chrono::Local;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tool configuration, loaded from a YAML file.
///
/// Every field has a default; a missing file yields the full default
/// configuration, and a partial file fills in only what it names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the HTML report is written into
    pub output_dir: String,

    /// Number of concurrent workers
    pub concurrency: usize,

    /// Per-request timeout, in seconds
    pub request_timeout_secs: u64,

    /// Delay a worker observes between jobs, in milliseconds
    pub retry_delay_ms: u64,

    /// Maximum attempts per network query
    pub max_retries: u32,

    /// Network prefixes (CIDR blocks) to query
    pub prefixes: Vec<String>,

    /// AbuseIPDB API keys; any request may use any key
    pub api_keys: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            concurrency: 20,
            request_timeout_secs: 20,
            retry_delay_ms: 50,
            max_retries: 3,
            prefixes: Vec::new(),
            api_keys: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the given path.
    ///
    /// A missing file is not an error. Zero values for `concurrency` and
    /// `max_retries` are normalized back to their defaults, since neither
    /// makes sense at zero.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let defaults = Self::default();
        if config.concurrency == 0 {
            config.concurrency = defaults.concurrency;
        }
        if config.max_retries == 0 {
            config.max_retries = defaults.max_retries;
        }
        if config.output_dir.is_empty() {
            config.output_dir = defaults.output_dir;
        }

        Ok(config)
    }

    /// Per-request timeout as a [`Duration`]
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Inter-job delay as a [`Duration`]
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Path of today's report file, `<output_dir>/report_<YYYYMMDD>.html`
    #[must_use]
    pub fn output_file(&self) -> PathBuf {
        let filename = format!("report_{}.html", Local::now().format("%Y%m%d"));
        Path::new(&self.output_dir).join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("/nonexistent/config.yaml")).unwrap();

        assert_eq!(config.output_dir, ".");
        assert_eq!(config.concurrency, 20);
        assert_eq!(config.request_timeout_secs, 20);
        assert_eq!(config.retry_delay_ms, 50);
        assert_eq!(config.max_retries, 3);
        assert!(config.prefixes.is_empty());
        assert!(config.api_keys.is_empty());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "concurrency: 5\nprefixes:\n  - 10.0.0.0/8\napi_keys:\n  - secret"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.concurrency, 5);
        assert_eq!(config.prefixes, vec!["10.0.0.0/8"]);
        assert_eq!(config.api_keys, vec!["secret"]);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.output_dir, ".");
    }

    #[test]
    fn zero_values_normalize_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "concurrency: 0\nmax_retries: 0").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.concurrency, 20);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn empty_output_dir_normalizes_to_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_dir: \"\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.output_dir, ".");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "concurrency: [not a number").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn output_file_lands_in_output_dir() {
        let config = Config {
            output_dir: "/tmp/reports".to_string(),
            ..Config::default()
        };

        let path = config.output_file();
        assert!(path.starts_with("/tmp/reports"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".html"));
    }
}
