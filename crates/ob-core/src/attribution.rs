//! Attribution snapshot.
//!
//! The attribution collaborator delivers an opaque key/value blob once
//! per install. The core parses it into an immutable snapshot and only
//! ever inspects a handful of well-known keys (`af_status`,
//! `install_time`); everything else is carried through to the config
//! request untouched.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::device::DeviceMetadata;
use crate::error::FetchError;

/// Key/value install-attribution data, immutable once captured.
///
/// May be replaced exactly once by the delayed organic re-fetch; the
/// replacement is a whole new snapshot, never an in-place edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionSnapshot {
    fields: BTreeMap<String, Value>,
}

impl AttributionSnapshot {
    /// Empty snapshot, used when attribution fails so downstream
    /// consumers are not blocked indefinitely.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the collaborator's raw callback string.
    ///
    /// The blob is a JSON object; anything else is a parse failure.
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| FetchError::Parse(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(Self {
                fields: map.into_iter().collect(),
            }),
            other => Err(FetchError::Parse(format!(
                "expected a json object, got {other}"
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Whether this install carries no attributable marketing source.
    pub fn is_organic(&self) -> bool {
        self.str_field("af_status")
            .is_some_and(|s| s.eq_ignore_ascii_case("organic"))
    }

    /// Install timestamp, if the collaborator reported one.
    ///
    /// The collaborator uses `"%Y-%m-%d %H:%M:%S"` (with optional
    /// fractional seconds); RFC 3339 is accepted as a fallback.
    pub fn install_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.str_field("install_time")?;
        for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(naive.and_utc());
            }
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Build the remote-config request body: the snapshot plus device
    /// metadata and, when known, the push token. Existing attribution
    /// keys always win over the enrichment (insert-if-absent).
    pub fn config_request_body(
        &self,
        device: &DeviceMetadata,
        push_token: Option<&str>,
    ) -> serde_json::Map<String, Value> {
        let mut body: serde_json::Map<String, Value> =
            self.fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        let mut put = |key: &str, value: Value| {
            body.entry(key.to_string()).or_insert(value);
        };
        put("af_id", Value::String(device.af_id.clone()));
        put("bundle_id", Value::String(device.bundle_id.clone()));
        put("store_id", Value::String(device.store_id.clone()));
        put("locale", Value::String(device.locale.clone()));
        put("os", Value::String(device.os.clone()));
        if let Some(token) = push_token {
            put("push_token", Value::String(token.to_string()));
            if let Some(project_id) = &device.firebase_project_id {
                put("firebase_project_id", Value::String(project_id.clone()));
            }
        }
        body
    }
}
