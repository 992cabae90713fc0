use crate::domain::language::Language;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human-readable location of `path`, for log output.
    fn describe(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn output_file(&self) -> &str;
    fn languages(&self) -> &[Language];
    fn request_timeout(&self) -> Duration;
    fn max_probes(&self) -> u64;
    fn monitoring_enabled(&self) -> bool;
}

/// Remote provider of fact texts, addressed by identifier and language.
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch_fact(&self, id: u64, language: Language) -> Result<String>;
}
