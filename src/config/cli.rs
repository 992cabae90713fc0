use crate::adapters::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::core::discovery::DEFAULT_MAX_PROBES;
use crate::core::persist::DEFAULT_OUTPUT_FILE;
use crate::domain::{ConfigProvider, Language};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "meow-etl")]
#[command(about = "Extracts every fact in every supported language into one JSON document")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = ".")]
    pub output_dir: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Comma-separated language codes; all supported languages when omitted
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<Language>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Upper bound on discovery probes
    #[arg(long, default_value_t = DEFAULT_MAX_PROBES)]
    pub max_probes: u64,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per stage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn languages(&self) -> &[Language] {
        if self.languages.is_empty() {
            &Language::ALL[..]
        } else {
            self.languages.as_slice()
        }
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn max_probes(&self) -> u64 {
        self.max_probes
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;

    #[test]
    fn test_defaults() {
        let config = CliConfig::try_parse_from(["meow-etl"]).unwrap();

        assert_eq!(config.base_url(), "https://meowfacts.herokuapp.com/");
        assert_eq!(config.output_file(), "meowfacts_dataset.json");
        assert_eq!(config.languages(), &Language::ALL[..]);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_probes(), 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_language_list() {
        let config =
            CliConfig::try_parse_from(["meow-etl", "--languages", "ger,eng,kor"]).unwrap();
        assert_eq!(
            config.languages(),
            &[Language::Ger, Language::Eng, Language::Kor][..]
        );
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(CliConfig::try_parse_from(["meow-etl", "--languages", "eng,xyz"]).is_err());
    }

    #[test]
    fn test_validation_failures() {
        let config = CliConfig::try_parse_from(["meow-etl", "--timeout-secs", "0"]).unwrap();
        assert!(config.validate().is_err());

        let config = CliConfig::try_parse_from(["meow-etl", "--max-probes", "0"]).unwrap();
        assert!(config.validate().is_err());

        let config =
            CliConfig::try_parse_from(["meow-etl", "--output-file", "sub/facts.json"]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_repeated_language_is_invalid() {
        let config =
            CliConfig::try_parse_from(["meow-etl", "--languages", "eng,ger,eng"]).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EtlError::InvalidConfigValueError { ref field, .. }) if field == "languages"
        ));
    }
}
