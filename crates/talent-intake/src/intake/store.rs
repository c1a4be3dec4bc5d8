use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;

use super::domain::NormalizedApplicationRecord;
use crate::config::StoreConfig;

/// Write side of the persistence API, kept behind a trait so the handler can be exercised
/// without a network.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert(&self, record: &NormalizedApplicationRecord) -> Result<(), StoreError>;
}

/// Error enumeration for persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("persistence API rejected the write with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("persistence API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Store backed by a PostgREST-style `rest/v1/<table>` endpoint.
pub struct RestApplicationStore {
    client: reqwest::Client,
    endpoint: String,
    service_key: String,
}

impl RestApplicationStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let endpoint = format!(
            "{}/rest/v1/{}",
            config.base_url.trim_end_matches('/'),
            config.table
        );

        Ok(Self {
            client,
            endpoint,
            service_key: config.service_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ApplicationStore for RestApplicationStore {
    async fn insert(&self, record: &NormalizedApplicationRecord) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header("Prefer", HeaderValue::from_static("return=minimal"))
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected { status, body })
    }
}
