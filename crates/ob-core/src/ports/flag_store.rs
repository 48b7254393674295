//! Persistent flag store port.
//!
//! A durable key/value store surviving process restarts. Operations
//! are durable before the future resolves; there is no multi-key
//! atomicity, and each flag must be independently recoverable. The
//! single-writer-per-key discipline is enforced by the orchestrator,
//! not by implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FlagStoreError;

/// Well-known flag keys. Every key has exactly one writing component.
pub mod keys {
    /// Recorded consent decision (`ConsentStatus`).
    pub const CONSENT_STATUS: &str = "consent_status";
    /// Skip-cooldown deadline (RFC 3339).
    pub const SKIP_DEADLINE: &str = "skip_deadline";
    /// Last push token delivered by the messaging collaborator.
    pub const PUSH_TOKEN: &str = "push_token";
    /// Pending deep-link payload saved from an opened push.
    pub const PENDING_PUSH: &str = "pending_push";
    /// Last content locator returned by a successful config fetch.
    pub const CONTENT_LOCATOR: &str = "content_locator";
    /// Set when the last config fetch failed; consumed by
    /// platform-level behavior outside this core.
    pub const CONFIG_FAILED: &str = "config_failed";
    /// Whether the user-profile side effect has fired for this install.
    pub const PROFILE_SENT: &str = "profile_sent";
}

#[async_trait]
pub trait FlagStorePort: Send + Sync {
    /// Read a flag; `None` when the key was never written or deleted.
    async fn get(&self, key: &str) -> Result<Option<Value>, FlagStoreError>;

    /// Durably write a flag before returning.
    async fn set(&self, key: &str, value: Value) -> Result<(), FlagStoreError>;

    /// Remove a flag; removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), FlagStoreError>;
}
