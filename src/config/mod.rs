#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::domain::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;

pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_url("base_url", config.base_url())?;
    validation::validate_path("output_dir", config.output_dir())?;
    validation::validate_file_name("output_file", config.output_file())?;
    validation::validate_non_empty("languages", config.languages())?;
    validation::validate_unique("languages", config.languages())?;
    validation::validate_range(
        "timeout_secs",
        config.request_timeout().as_secs(),
        1,
        MAX_TIMEOUT_SECS,
    )?;
    validation::validate_positive_number("max_probes", config.max_probes(), 1)?;
    Ok(())
}
