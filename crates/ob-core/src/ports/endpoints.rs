//! Outbound endpoint ports, implemented by `ob-net`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::attribution::AttributionSnapshot;
use crate::error::FetchError;
use crate::profile::UserProfile;

/// Parsed body of a config endpoint response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub url: Option<String>,
    /// Advisory expiry (epoch seconds); not enforced by this core.
    #[serde(default)]
    pub expires: Option<i64>,
}

/// Remote configuration endpoint (POST, JSON body).
#[async_trait]
pub trait ConfigEndpointPort: Send + Sync {
    /// Fetch the remote configuration with the merged
    /// attribution/device body.
    async fn fetch_config(&self, body: &Map<String, Value>) -> Result<ConfigResponse, FetchError>;

    /// Re-register the push token with the config endpoint.
    /// Fire-and-forget semantics; callers only log failures.
    async fn register_token(&self, body: &Map<String, Value>) -> Result<(), FetchError>;
}

/// User-profile endpoint (POST, fire-and-forget).
#[async_trait]
pub trait ProfileEndpointPort: Send + Sync {
    async fn send_profile(&self, profile: &UserProfile) -> Result<(), FetchError>;
}

/// Interaction telemetry key sent to `/interaction/{messageId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// User opened a push notification.
    PushClick,
    /// App quit or main scene unloaded.
    SessionEnd,
}

impl InteractionKind {
    /// Wire key for the single key/timestamp body.
    pub fn key(self) -> &'static str {
        match self {
            Self::PushClick => "pushtimeclick",
            Self::SessionEnd => "leavefromsession",
        }
    }
}

/// Interaction endpoint (POST, fire-and-forget).
#[async_trait]
pub trait InteractionEndpointPort: Send + Sync {
    async fn send_interaction(
        &self,
        message_id: &str,
        kind: InteractionKind,
        at: DateTime<Utc>,
    ) -> Result<(), FetchError>;
}

/// On-demand attribution install-data fetch, used for the single
/// delayed organic re-fetch.
#[async_trait]
pub trait InstallDataPort: Send + Sync {
    async fn fetch_install_data(&self) -> Result<AttributionSnapshot, FetchError>;
}
