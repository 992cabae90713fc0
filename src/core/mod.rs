pub mod discovery;
pub mod etl;
pub mod fetch;
pub mod persist;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::{ConfigProvider, FactRecord, FactSource, FetchOutcome, Language, Storage};
pub use crate::utils::error::Result;
