//! User profile body for the fire-and-forget profile endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::attribution::AttributionSnapshot;
use crate::device::DeviceMetadata;

/// Body of the user-profile POST. Field names are wire-significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub os: String,
    pub country: String,
    pub af_id: String,
    pub firebase_project_id: String,
    pub push_token: String,
    pub locale: String,
    pub bundle_id: String,
    #[serde(rename = "installDate")]
    pub install_date: String,
    pub dep: bool,
    pub reg: bool,
}

impl UserProfile {
    /// Assemble the profile from whatever is known at send time.
    ///
    /// `country` has no reliable source on either platform and
    /// defaults to "US"; the install date falls back to `now` when
    /// attribution never reported one.
    pub fn compose(
        attribution: Option<&AttributionSnapshot>,
        device: &DeviceMetadata,
        push_token: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let install_date = attribution
            .and_then(AttributionSnapshot::install_time)
            .unwrap_or(now);
        Self {
            os: device.os.clone(),
            country: "US".to_string(),
            af_id: device.af_id.clone(),
            firebase_project_id: device
                .firebase_project_id
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            push_token: push_token.to_string(),
            locale: device.locale.clone(),
            bundle_id: device.bundle_id.clone(),
            install_date: install_date.to_rfc3339_opts(SecondsFormat::Secs, true),
            dep: false,
            reg: false,
        }
    }
}
