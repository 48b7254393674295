//! Attribution install-data re-fetch client.
//!
//! Used only by the delayed organic re-fetch; the initial attribution
//! callback comes from the SDK, not from here.

use async_trait::async_trait;

use ob_core::attribution::AttributionSnapshot;
use ob_core::error::FetchError;
use ob_core::ports::InstallDataPort;

use crate::{check_status, transport_err};

pub struct HttpInstallDataClient {
    client: reqwest::Client,
    install_data_base_url: String,
    bundle_id: String,
    dev_key: String,
    af_id: String,
}

impl HttpInstallDataClient {
    pub fn new(
        client: reqwest::Client,
        install_data_base_url: impl Into<String>,
        bundle_id: impl Into<String>,
        dev_key: impl Into<String>,
        af_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            install_data_base_url: install_data_base_url.into(),
            bundle_id: bundle_id.into(),
            dev_key: dev_key.into(),
            af_id: af_id.into(),
        }
    }

    fn install_data_url(&self) -> String {
        format!(
            "{}/{}?devkey={}&device_id={}",
            self.install_data_base_url.trim_end_matches('/'),
            self.bundle_id,
            self.dev_key,
            self.af_id
        )
    }
}

#[async_trait]
impl InstallDataPort for HttpInstallDataClient {
    async fn fetch_install_data(&self) -> Result<AttributionSnapshot, FetchError> {
        let response = self
            .client
            .get(self.install_data_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_err)?;
        let response = check_status(response)?;

        let text = response.text().await.map_err(transport_err)?;
        AttributionSnapshot::parse(&text)
    }
}
