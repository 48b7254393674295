//! Application configuration domain model.

use serde::{Deserialize, Serialize};

/// Application configuration for the onboarding flow.
///
/// Loaded by the composition root (file + environment); every field
/// has a default so a missing config file still yields a runnable
/// setup in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Vendor app id (numeric store id without the "id" prefix).
    pub app_id: String,

    /// Attribution SDK dev key.
    pub dev_key: String,

    /// Reverse-DNS application identifier.
    pub bundle_id: String,

    /// Push project identifier, when known at build time.
    pub firebase_project_id: Option<String>,

    /// Remote endpoints.
    pub endpoints: EndpointConfig,

    /// Flow timing knobs.
    pub timing: TimingConfig,
}

/// Remote endpoint locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Remote configuration endpoint (POST, JSON body).
    pub config_url: String,

    /// User-profile endpoint (POST, fire-and-forget).
    pub profile_url: String,

    /// Base for `/interaction/{messageId}` events.
    pub interaction_base_url: String,

    /// Base for the attribution install-data re-fetch.
    pub install_data_base_url: String,
}

/// Timing knobs for the flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay before the single organic install-data re-fetch.
    pub organic_refetch_delay_secs: u64,

    /// Cooldown after a skip before the prompt may be shown again.
    pub skip_cooldown_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            dev_key: String::new(),
            bundle_id: String::new(),
            firebase_project_id: None,
            endpoints: EndpointConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            config_url: "https://chickenrunn.com/config.php".to_string(),
            profile_url: "https://pnsynd.com/api/publicapa/add-user/".to_string(),
            interaction_base_url: "https://pnsynd.com/api".to_string(),
            install_data_base_url: "https://gcdsdk.appsflyer.com/install_data/v4.0".to_string(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            organic_refetch_delay_secs: 5,
            skip_cooldown_days: 3,
        }
    }
}

impl AppConfig {
    /// Store identifier as sent to the config endpoint.
    pub fn store_id(&self) -> String {
        format!("id{}", self.app_id)
    }
}
