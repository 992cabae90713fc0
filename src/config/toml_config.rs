use crate::adapters::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::core::discovery::DEFAULT_MAX_PROBES;
use crate::core::persist::DEFAULT_OUTPUT_FILE;
use crate::domain::{ConfigProvider, Language};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File-based configuration. Every section and key is optional; missing
/// values fall back to the same defaults as the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    pub discovery: Option<DiscoveryConfig>,
    pub extract: Option<ExtractConfig>,
    #[serde(default)]
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub max_probes: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub languages: Option<Vec<Language>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_dir: Option<String>,
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the variable's value. Unset variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        self.source.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn output_dir(&self) -> &str {
        self.load.output_dir.as_deref().unwrap_or(".")
    }

    fn output_file(&self) -> &str {
        self.load
            .output_file
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    fn languages(&self) -> &[Language] {
        self.extract
            .as_ref()
            .and_then(|e| e.languages.as_deref())
            .unwrap_or(&Language::ALL[..])
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    fn max_probes(&self) -> u64 {
        self.discovery
            .as_ref()
            .and_then(|d| d.max_probes)
            .unwrap_or(DEFAULT_MAX_PROBES)
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
base_url = "http://localhost:9000/"
timeout_seconds = 3

[discovery]
max_probes = 250

[extract]
languages = ["eng", "ukr"]

[load]
output_dir = "./out"
output_file = "facts.json"

[monitoring]
enabled = true
"#,
        )
        .unwrap();

        assert_eq!(config.base_url(), "http://localhost:9000/");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.max_probes(), 250);
        assert_eq!(config.languages(), &[Language::Eng, Language::Ukr][..]);
        assert_eq!(config.output_dir(), "./out");
        assert_eq!(config.output_file(), "facts.json");
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.output_file(), DEFAULT_OUTPUT_FILE);
        assert_eq!(config.languages().len(), 13);
        assert_eq!(config.max_probes(), DEFAULT_MAX_PROBES);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("MEOW_ETL_TEST_OUTPUT_DIR", "/tmp/meow");
        let config = TomlConfig::from_toml_str(
            r#"
[load]
output_dir = "${MEOW_ETL_TEST_OUTPUT_DIR}"
output_file = "${MEOW_ETL_TEST_UNSET_VARIABLE}.json"
"#,
        )
        .unwrap();

        assert_eq!(config.output_dir(), "/tmp/meow");
        assert_eq!(config.output_file(), "${MEOW_ETL_TEST_UNSET_VARIABLE}.json");
    }

    #[test]
    fn test_unknown_language_fails_to_parse() {
        let result = TomlConfig::from_toml_str(
            r#"
[extract]
languages = ["eng", "elvish"]
"#,
        );
        assert!(matches!(
            result,
            Err(EtlError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_empty_language_list_is_invalid() {
        let config = TomlConfig::from_toml_str("[extract]\nlanguages = []\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_repeated_language_is_invalid() {
        let config =
            TomlConfig::from_toml_str("[extract]\nlanguages = [\"eng\", \"eng\"]\n").unwrap();
        assert_eq!(config.languages(), &[Language::Eng, Language::Eng][..]);
        assert!(matches!(
            config.validate(),
            Err(EtlError::InvalidConfigValueError { ref field, .. }) if field == "languages"
        ));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meow-etl.toml");
        std::fs::write(&path, "[discovery]\nmax_probes = 7\n").unwrap();

        let config = TomlConfig::from_file(&path).unwrap();
        assert_eq!(config.max_probes(), 7);

        assert!(TomlConfig::from_file(temp_dir.path().join("missing.toml")).is_err());
    }
}
