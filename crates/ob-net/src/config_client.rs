//! Remote configuration endpoint client.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use ob_core::error::FetchError;
use ob_core::ports::{ConfigEndpointPort, ConfigResponse};

use crate::{check_status, transport_err};

/// POSTs the merged attribution/device body to the config endpoint
/// and parses the `{ok, url, expires}` response. Also carries the
/// token re-registration call, which targets the same endpoint.
pub struct HttpConfigClient {
    client: reqwest::Client,
    config_url: String,
}

impl HttpConfigClient {
    pub fn new(client: reqwest::Client, config_url: impl Into<String>) -> Self {
        Self {
            client,
            config_url: config_url.into(),
        }
    }
}

#[async_trait]
impl ConfigEndpointPort for HttpConfigClient {
    async fn fetch_config(&self, body: &Map<String, Value>) -> Result<ConfigResponse, FetchError> {
        let response = self
            .client
            .post(&self.config_url)
            .header(reqwest::header::ACCEPT, "*/*")
            .json(body)
            .send()
            .await
            .map_err(transport_err)?;
        let response = check_status(response)?;

        let text = response.text().await.map_err(transport_err)?;
        debug!(len = text.len(), "config endpoint answered");
        serde_json::from_str(&text).map_err(|e| FetchError::Parse(e.to_string()))
    }

    async fn register_token(&self, body: &Map<String, Value>) -> Result<(), FetchError> {
        let response = self
            .client
            .post(&self.config_url)
            .json(body)
            .send()
            .await
            .map_err(transport_err)?;
        check_status(response)?;
        Ok(())
    }
}
