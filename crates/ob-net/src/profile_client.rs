//! User-profile endpoint client.

use async_trait::async_trait;

use ob_core::error::FetchError;
use ob_core::ports::ProfileEndpointPort;
use ob_core::profile::UserProfile;

use crate::{check_status, transport_err};

/// Fire-and-forget POST of the user profile. Callers log failures and
/// never retry.
pub struct HttpProfileClient {
    client: reqwest::Client,
    profile_url: String,
}

impl HttpProfileClient {
    pub fn new(client: reqwest::Client, profile_url: impl Into<String>) -> Self {
        Self {
            client,
            profile_url: profile_url.into(),
        }
    }
}

#[async_trait]
impl ProfileEndpointPort for HttpProfileClient {
    async fn send_profile(&self, profile: &UserProfile) -> Result<(), FetchError> {
        let response = self
            .client
            .post(&self.profile_url)
            .json(profile)
            .send()
            .await
            .map_err(transport_err)?;
        check_status(response)?;
        Ok(())
    }
}
