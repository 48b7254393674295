//! Shared test doubles for the use-case tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use ob_core::attribution::AttributionSnapshot;
use ob_core::consent::PermissionOutcome;
use ob_core::device::{DeviceMetadata, Orientation};
use ob_core::error::{FetchError, FlagStoreError};
use ob_core::ports::{
    ClockPort, ConfigEndpointPort, ConfigResponse, DelayPort, FlagStorePort, InstallDataPort,
    InteractionEndpointPort, InteractionKind, MessagingPort, PermissionPort, ProfileEndpointPort,
    PromptPort, RendererPort,
};
use ob_core::profile::UserProfile;

pub fn test_device() -> DeviceMetadata {
    DeviceMetadata {
        os: "Android".into(),
        locale: "en-US".into(),
        bundle_id: "com.example.app".into(),
        store_id: "id12345".into(),
        af_id: "af-9000".into(),
        firebase_project_id: Some("proj-1".into()),
    }
}

/// In-memory flag store.
#[derive(Default)]
pub struct MemoryFlagStore {
    flags: Mutex<HashMap<String, Value>>,
}

#[async_trait]
impl FlagStorePort for MemoryFlagStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, FlagStoreError> {
        Ok(self.flags.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), FlagStoreError> {
        self.flags.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), FlagStoreError> {
        self.flags.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Settable clock.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance_to(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Delay that records the requested duration and resolves immediately.
#[derive(Default)]
pub struct ImmediateDelay {
    pub requested: Mutex<Vec<Duration>>,
}

#[async_trait]
impl DelayPort for ImmediateDelay {
    async fn sleep(&self, duration: Duration) {
        self.requested.lock().unwrap().push(duration);
    }
}

/// Renderer recording every `display` call.
#[derive(Default)]
pub struct RecordingRenderer {
    pub displayed: Mutex<Vec<String>>,
    pub hidden: Mutex<usize>,
}

#[async_trait]
impl RendererPort for RecordingRenderer {
    async fn display(&self, url: &str) -> anyhow::Result<()> {
        self.displayed.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn hide(&self) {
        *self.hidden.lock().unwrap() += 1;
    }
}

/// Prompt surface recording show/hide calls.
#[derive(Default)]
pub struct RecordingPrompt {
    pub shown: Mutex<Vec<Orientation>>,
    pub hidden: Mutex<usize>,
}

#[async_trait]
impl PromptPort for RecordingPrompt {
    async fn show(&self, orientation: Orientation) {
        self.shown.lock().unwrap().push(orientation);
    }

    async fn hide(&self) {
        *self.hidden.lock().unwrap() += 1;
    }
}

/// Permission dialog resolving with a preset outcome.
pub struct StubPermission {
    pub outcome: PermissionOutcome,
}

#[async_trait]
impl PermissionPort for StubPermission {
    async fn request(&self) -> PermissionOutcome {
        self.outcome
    }
}

#[derive(Default)]
pub struct RecordingMessaging {
    pub enabled: Mutex<usize>,
}

#[async_trait]
impl MessagingPort for RecordingMessaging {
    async fn enable_registration(&self) -> anyhow::Result<()> {
        *self.enabled.lock().unwrap() += 1;
        Ok(())
    }
}

/// Config endpoint returning preset responses and recording bodies.
pub struct StubConfigEndpoint {
    pub response: Mutex<Result<ConfigResponse, FetchError>>,
    pub fetch_bodies: Mutex<Vec<Map<String, Value>>>,
    pub token_bodies: Mutex<Vec<Map<String, Value>>>,
}

impl StubConfigEndpoint {
    pub fn ok(url: &str) -> Self {
        Self {
            response: Mutex::new(Ok(ConfigResponse {
                ok: true,
                url: Some(url.to_string()),
                expires: None,
            })),
            fetch_bodies: Mutex::new(Vec::new()),
            token_bodies: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: Mutex::new(Err(FetchError::Transport("offline".into()))),
            fetch_bodies: Mutex::new(Vec::new()),
            token_bodies: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ConfigEndpointPort for StubConfigEndpoint {
    async fn fetch_config(&self, body: &Map<String, Value>) -> Result<ConfigResponse, FetchError> {
        self.fetch_bodies.lock().unwrap().push(body.clone());
        self.response.lock().unwrap().clone()
    }

    async fn register_token(&self, body: &Map<String, Value>) -> Result<(), FetchError> {
        self.token_bodies.lock().unwrap().push(body.clone());
        Ok(())
    }
}

/// Profile endpoint recording every send.
#[derive(Default)]
pub struct RecordingProfileEndpoint {
    pub sent: Mutex<Vec<UserProfile>>,
}

#[async_trait]
impl ProfileEndpointPort for RecordingProfileEndpoint {
    async fn send_profile(&self, profile: &UserProfile) -> Result<(), FetchError> {
        self.sent.lock().unwrap().push(profile.clone());
        Ok(())
    }
}

/// Interaction endpoint recording every event.
#[derive(Default)]
pub struct RecordingInteractionEndpoint {
    pub sent: Mutex<Vec<(String, InteractionKind, DateTime<Utc>)>>,
}

#[async_trait]
impl InteractionEndpointPort for RecordingInteractionEndpoint {
    async fn send_interaction(
        &self,
        message_id: &str,
        kind: InteractionKind,
        at: DateTime<Utc>,
    ) -> Result<(), FetchError> {
        self.sent
            .lock()
            .unwrap()
            .push((message_id.to_string(), kind, at));
        Ok(())
    }
}

/// Install-data endpoint with a preset result.
pub struct StubInstallData {
    pub result: Mutex<Result<AttributionSnapshot, FetchError>>,
    pub calls: Mutex<usize>,
}

impl StubInstallData {
    pub fn returning(result: Result<AttributionSnapshot, FetchError>) -> Self {
        Self {
            result: Mutex::new(result),
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl InstallDataPort for StubInstallData {
    async fn fetch_install_data(&self) -> Result<AttributionSnapshot, FetchError> {
        *self.calls.lock().unwrap() += 1;
        self.result.lock().unwrap().clone()
    }
}
