//! Device identity and orientation.

use serde::{Deserialize, Serialize};

/// Static device metadata merged into the config request and the user
/// profile body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceMetadata {
    /// Operating system label ("iOS", "Android", "Other").
    pub os: String,
    /// BCP 47 locale name, e.g. "en-US".
    pub locale: String,
    /// Reverse-DNS application identifier.
    pub bundle_id: String,
    /// Store identifier derived from the vendor app id.
    pub store_id: String,
    /// Install-scoped attribution id assigned by the attribution SDK.
    pub af_id: String,
    /// Push project identifier, when the messaging SDK exposes one.
    pub firebase_project_id: Option<String>,
}

/// Current device orientation, used only to pick the prompt variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Portrait
    }
}
