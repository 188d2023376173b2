use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::models::DEFAULT_FIR_CODES;

pub const DEFAULT_BOUNDARY_URL: &str =
    "https://github.com/vatsimnetwork/vatspy-data-project/releases/download/v2408.2/Boundaries.geojson";
pub const DEFAULT_DATA_URL: &str = "https://data.vatsim.net/v3/vatsim-data.json";
pub const DEFAULT_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "firwatch/0.1 (FIR traffic monitor)";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// FIR codes to report on, in priority order
    pub allowlist: Vec<String>,
    pub interval_seconds: u64,
    pub boundary_url: String,
    pub data_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Clear the terminal before each report
    pub clear_screen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowlist: DEFAULT_FIR_CODES.iter().map(|c| c.to_string()).collect(),
            interval_seconds: DEFAULT_INTERVAL_SECS,
            boundary_url: DEFAULT_BOUNDARY_URL.to_string(),
            data_url: DEFAULT_DATA_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            clear_screen: true,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.allowlist.is_empty() {
            bail!("allowlist must name at least one FIR");
        }

        let mut seen = HashSet::new();
        for code in &self.allowlist {
            if code.trim().is_empty() {
                bail!("allowlist contains an empty FIR code");
            }
            if !seen.insert(code.as_str()) {
                bail!("allowlist contains {} more than once", code);
            }
        }

        if self.interval_seconds == 0 {
            bail!("interval_seconds must be positive");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be positive");
        }

        check_url("boundary_url", &self.boundary_url)?;
        check_url("data_url", &self.data_url)?;

        Ok(())
    }
}

fn check_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{} is not a valid URL", field))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{} must use http or https, got {}", field, url.scheme());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.interval(), Duration::from_secs(15));
        assert_eq!(config.allowlist, vec!["VABF", "VIDF", "VOMF", "VECF", "VEGF"]);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
allowlist = ["VIDF", "VABF"]
interval_seconds = 30
"#
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.allowlist, vec!["VIDF", "VABF"]);
        assert_eq!(config.interval_seconds, 30);
        assert_eq!(config.boundary_url, DEFAULT_BOUNDARY_URL);
        assert!(config.clear_screen);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "interval_seconds = \"soon\"").unwrap();
        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.allowlist.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.allowlist.push("VABF".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.interval_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.boundary_url = "ftp://example.com/b.geojson".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.data_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
