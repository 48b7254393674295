//! Typed persistence wrapper over the flag store.
//!
//! The orchestrator is the single writer for every key; controllers
//! return decisions and never touch the store themselves. Hydration is
//! deliberately tolerant: after a crash any individually-stale subset
//! of flags must still produce a workable state, so one unreadable
//! flag falls back to its default instead of failing the whole load.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::warn;

use ob_core::consent::ConsentStatus;
use ob_core::deeplink::PendingDeepLink;
use ob_core::error::FlagStoreError;
use ob_core::onboarding::OnboardingState;
use ob_core::ports::{keys, FlagStorePort};

#[derive(Clone)]
pub struct StateStore {
    store: Arc<dyn FlagStorePort>,
}

impl StateStore {
    pub fn new(store: Arc<dyn FlagStorePort>) -> Self {
        Self { store }
    }

    /// Rehydrate process-start state from the durable flags.
    pub async fn hydrate(&self) -> OnboardingState {
        let mut state = OnboardingState::default();

        if let Some(value) = self.read(keys::CONSENT_STATUS).await {
            match serde_json::from_value::<ConsentStatus>(value) {
                Ok(status) => state.consent = status,
                Err(e) => warn!(error = %e, "stored consent status unreadable, defaulting"),
            }
        }
        if let Some(value) = self.read(keys::SKIP_DEADLINE).await {
            state.skip_deadline = value
                .as_str()
                .and_then(|s| s.parse::<DateTime<Utc>>().ok());
            if state.skip_deadline.is_none() {
                warn!("stored skip deadline unreadable, defaulting");
            }
        }
        if let Some(value) = self.read(keys::PUSH_TOKEN).await {
            state.push_token = value.as_str().map(str::to_string);
        }
        if let Some(value) = self.read(keys::PENDING_PUSH).await {
            match serde_json::from_value::<PendingDeepLink>(value) {
                Ok(link) => state.pending_deep_link = Some(link),
                Err(e) => warn!(error = %e, "stored pending push unreadable, dropping"),
            }
        }
        if let Some(value) = self.read(keys::CONTENT_LOCATOR).await {
            state.content_locator = value.as_str().map(str::to_string);
        }
        if let Some(value) = self.read(keys::CONFIG_FAILED).await {
            state.last_fetch_failed = value.as_bool().unwrap_or(false);
        }
        if let Some(value) = self.read(keys::PROFILE_SENT).await {
            state.profile_sent = value.as_bool().unwrap_or(false);
        }

        state
    }

    async fn read(&self, key: &str) -> Option<Value> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "flag read failed, treating as absent");
                None
            }
        }
    }

    /// Persist a consent decision together with its cooldown deadline.
    pub async fn save_consent(
        &self,
        status: ConsentStatus,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<(), FlagStoreError> {
        self.store
            .set(keys::CONSENT_STATUS, serde_json::to_value(status)?)
            .await?;
        match deadline {
            Some(deadline) => {
                self.store
                    .set(keys::SKIP_DEADLINE, json!(deadline.to_rfc3339()))
                    .await
            }
            None => self.store.delete(keys::SKIP_DEADLINE).await,
        }
    }

    pub async fn save_push_token(&self, token: &str) -> Result<(), FlagStoreError> {
        self.store.set(keys::PUSH_TOKEN, json!(token)).await
    }

    pub async fn save_pending_push(
        &self,
        pending: Option<&PendingDeepLink>,
    ) -> Result<(), FlagStoreError> {
        match pending {
            Some(link) => {
                self.store
                    .set(keys::PENDING_PUSH, serde_json::to_value(link)?)
                    .await
            }
            None => self.store.delete(keys::PENDING_PUSH).await,
        }
    }

    pub async fn save_content_locator(&self, locator: &str) -> Result<(), FlagStoreError> {
        self.store.set(keys::CONTENT_LOCATOR, json!(locator)).await
    }

    pub async fn save_config_failed(&self, failed: bool) -> Result<(), FlagStoreError> {
        self.store.set(keys::CONFIG_FAILED, json!(failed)).await
    }

    pub async fn save_profile_sent(&self) -> Result<(), FlagStoreError> {
        self.store.set(keys::PROFILE_SENT, json!(true)).await
    }
}
