use crate::domain::{ConfigProvider, FactSource, Language};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://meowfacts.herokuapp.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct FactResponse {
    data: Vec<String>,
}

/// Fact provider reached over HTTP: `GET <base>?id=<id>[&lang=<code>]`.
#[derive(Debug, Clone)]
pub struct HttpFactSource {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpFactSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| EtlError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
            timeout,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.base_url(), config.request_timeout())
    }
}

#[async_trait]
impl FactSource for HttpFactSource {
    async fn fetch_fact(&self, id: u64, language: Language) -> Result<String> {
        let url = fact_url(&self.base_url, id, language);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        parse_fact(&body)
    }
}

/// The default language is requested without a `lang` parameter.
pub fn fact_url(base_url: &Url, id: u64, language: Language) -> Url {
    let mut url = base_url.clone();
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("id", &id.to_string());
        if !language.is_default() {
            query.append_pair("lang", language.code());
        }
    }
    url
}

/// Takes the first string of the `data` array.
pub fn parse_fact(body: &str) -> Result<String> {
    let response: FactResponse = serde_json::from_str(body)?;
    response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| EtlError::ResponseShapeError {
            message: "field 'data' is an empty array".to_string(),
        })
}
