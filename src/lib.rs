pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{HttpFactSource, LocalStorage};
pub use crate::core::etl::{EtlEngine, RunOutcome};
pub use domain::{FactRecord, FetchOutcome, Language};
pub use utils::error::{EtlError, Result};
