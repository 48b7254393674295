//! Config fetcher.
//!
//! Issues the remote configuration request once attribution data is
//! available. At most one request per session: a second start while
//! one is in flight (or after a terminal outcome) is ignored, not
//! queued, to avoid duplicate remote writes. A failed fetch is a
//! terminal outcome for that attempt; the orchestrator falls back, it
//! does not retry.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use ob_core::attribution::AttributionSnapshot;
use ob_core::device::DeviceMetadata;
use ob_core::onboarding::{FetchPhase, OnboardingEvent, OnboardingState};
use ob_core::ports::ConfigEndpointPort;

pub struct ConfigFetcher {
    endpoint: Arc<dyn ConfigEndpointPort>,
    events: mpsc::Sender<OnboardingEvent>,
}

impl ConfigFetcher {
    pub fn new(endpoint: Arc<dyn ConfigEndpointPort>, events: mpsc::Sender<OnboardingEvent>) -> Self {
        Self { endpoint, events }
    }

    /// Start the fetch if no attempt has been made this session.
    pub fn start(&self, state: &mut OnboardingState, device: &DeviceMetadata) {
        if state.fetch_phase != FetchPhase::NotStarted {
            debug!(phase = ?state.fetch_phase, "config fetch already attempted, ignoring");
            return;
        }
        state.fetch_phase = FetchPhase::InFlight;

        let body = state
            .attribution
            .clone()
            .unwrap_or_else(AttributionSnapshot::empty)
            .config_request_body(device, state.push_token.as_deref());

        let endpoint = self.endpoint.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = endpoint.fetch_config(&body).await;
            if events
                .send(OnboardingEvent::ConfigFetchCompleted { result })
                .await
                .is_err()
            {
                debug!("orchestrator gone before config fetch completed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_device, StubConfigEndpoint};
    use serde_json::json;

    fn fetcher(
        endpoint: Arc<StubConfigEndpoint>,
    ) -> (ConfigFetcher, mpsc::Receiver<OnboardingEvent>) {
        let (tx, rx) = mpsc::channel(8);
        (ConfigFetcher::new(endpoint, tx), rx)
    }

    #[tokio::test]
    async fn test_fetch_posts_completion_event() {
        let endpoint = Arc::new(StubConfigEndpoint::ok("https://content"));
        let (fetcher, mut rx) = fetcher(endpoint.clone());

        let mut state = OnboardingState {
            attribution: Some(
                AttributionSnapshot::parse(r#"{"af_status":"Non-organic"}"#).unwrap(),
            ),
            push_token: Some("tok-1".into()),
            ..Default::default()
        };
        fetcher.start(&mut state, &test_device());
        assert_eq!(state.fetch_phase, FetchPhase::InFlight);

        let event = rx.recv().await.unwrap();
        let response = match event {
            OnboardingEvent::ConfigFetchCompleted { result } => result.unwrap(),
            other => panic!("unexpected event: {other:?}"),
        };
        assert_eq!(response.url.as_deref(), Some("https://content"));

        // Request body carries the merged attribution + device map
        let bodies = endpoint.fetch_bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["af_status"], json!("Non-organic"));
        assert_eq!(bodies[0]["bundle_id"], json!("com.example.app"));
        assert_eq!(bodies[0]["push_token"], json!("tok-1"));
    }

    #[tokio::test]
    async fn test_duplicate_start_is_ignored() {
        let endpoint = Arc::new(StubConfigEndpoint::ok("https://content"));
        let (fetcher, mut rx) = fetcher(endpoint.clone());

        let mut state = OnboardingState::default();
        fetcher.start(&mut state, &test_device());
        fetcher.start(&mut state, &test_device());

        // Exactly one request went out
        rx.recv().await.unwrap();
        assert_eq!(endpoint.fetch_bodies.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_restart_after_terminal_outcome() {
        let endpoint = Arc::new(StubConfigEndpoint::ok("https://content"));
        let (fetcher, _rx) = fetcher(endpoint.clone());

        for phase in [FetchPhase::Succeeded, FetchPhase::Failed] {
            let mut state = OnboardingState {
                fetch_phase: phase,
                ..Default::default()
            };
            fetcher.start(&mut state, &test_device());
            assert_eq!(state.fetch_phase, phase);
        }
        assert!(endpoint.fetch_bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_attribution_sends_device_only_body() {
        let endpoint = Arc::new(StubConfigEndpoint::ok("https://content"));
        let (fetcher, mut rx) = fetcher(endpoint.clone());

        let mut state = OnboardingState::default();
        fetcher.start(&mut state, &test_device());
        rx.recv().await.unwrap();

        let bodies = endpoint.fetch_bodies.lock().unwrap();
        assert_eq!(bodies[0]["af_id"], json!("af-9000"));
        assert!(!bodies[0].contains_key("af_status"));
    }
}
