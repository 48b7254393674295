//! Onboarding orchestrator.
//!
//! The sole owner of [`OnboardingState`] and the sole writer of "what
//! to show". All asynchronous signal sources (attribution, push
//! token, consent, config fetch) and app lifecycle events arrive on a
//! single mpsc intake and are processed in arrival order; the decision
//! function is re-run on every completion, so correctness never
//! depends on event ordering. Spawned side effects post their results
//! back onto the same intake instead of mutating state directly.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration as StdDuration;

use chrono::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use ob_core::config::TimingConfig;
use ob_core::consent::ConsentStatus;
use ob_core::device::{DeviceMetadata, Orientation};
use ob_core::error::{FetchError, FlagStoreError};
use ob_core::onboarding::{decision, FetchPhase, OnboardingEvent, OnboardingState, Presentation};
use ob_core::ports::{
    ClockPort, ConfigEndpointPort, ConfigResponse, DelayPort, FlagStorePort, InstallDataPort,
    InteractionEndpointPort, InteractionKind, MessagingPort, PermissionPort, ProfileEndpointPort,
    PromptPort, RendererPort,
};

use super::attribution_gate::{AttributionGate, GateOutcome};
use super::config_fetcher::ConfigFetcher;
use super::consent_controller::ConsentController;
use super::deeplink_interceptor::DeepLinkInterceptor;
use super::interaction::SendInteraction;
use super::register_token::RegisterPushToken;
use super::send_profile::SendUserProfile;
use super::state_store::StateStore;

/// Ports the orchestrator needs, gathered for construction.
pub struct OrchestratorPorts {
    pub flag_store: Arc<dyn FlagStorePort>,
    pub clock: Arc<dyn ClockPort>,
    pub delay: Arc<dyn DelayPort>,
    pub install_data: Arc<dyn InstallDataPort>,
    pub config_endpoint: Arc<dyn ConfigEndpointPort>,
    pub profile_endpoint: Arc<dyn ProfileEndpointPort>,
    pub interaction_endpoint: Arc<dyn InteractionEndpointPort>,
    pub permission: Arc<dyn PermissionPort>,
    pub renderer: Arc<dyn RendererPort>,
    pub prompt: Arc<dyn PromptPort>,
    pub messaging: Arc<dyn MessagingPort>,
}

pub struct OnboardingOrchestrator {
    state: Mutex<OnboardingState>,
    orientation: StdMutex<Orientation>,

    store: StateStore,
    clock: Arc<dyn ClockPort>,
    device: DeviceMetadata,

    gate: AttributionGate,
    fetcher: ConfigFetcher,
    consent: ConsentController,
    interceptor: DeepLinkInterceptor,
    send_profile: SendUserProfile,
    send_interaction: SendInteraction,
    register_token: RegisterPushToken,

    renderer: Arc<dyn RendererPort>,
    prompt: Arc<dyn PromptPort>,
    messaging: Arc<dyn MessagingPort>,
}

impl OnboardingOrchestrator {
    /// Build the orchestrator, rehydrating state from the flag store.
    ///
    /// `events` is the sender side of the intake the caller will drive
    /// through [`run`](Self::run); the internal controllers keep a
    /// clone to post their completions.
    pub async fn new(
        ports: OrchestratorPorts,
        device: DeviceMetadata,
        timing: TimingConfig,
        events: mpsc::Sender<OnboardingEvent>,
    ) -> Self {
        let store = StateStore::new(ports.flag_store.clone());
        let state = store.hydrate().await;

        let gate = AttributionGate::new(
            ports.install_data,
            ports.delay,
            StdDuration::from_secs(timing.organic_refetch_delay_secs),
            events.clone(),
        );
        let fetcher = ConfigFetcher::new(ports.config_endpoint.clone(), events.clone());
        let consent = ConsentController::new(
            ports.permission,
            Duration::days(timing.skip_cooldown_days),
            events,
        );
        let send_profile = SendUserProfile::new(ports.profile_endpoint, ports.clock.clone());
        let send_interaction =
            SendInteraction::new(ports.interaction_endpoint, ports.clock.clone());
        let register_token = RegisterPushToken::new(ports.config_endpoint);

        Self {
            state: Mutex::new(state),
            orientation: StdMutex::new(Orientation::default()),
            store,
            clock: ports.clock,
            device,
            gate,
            fetcher,
            consent,
            interceptor: DeepLinkInterceptor,
            send_profile,
            send_interaction,
            register_token,
            renderer: ports.renderer,
            prompt: ports.prompt,
            messaging: ports.messaging,
        }
    }

    /// Drain the event intake until every sender is gone.
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<OnboardingEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        debug!("event intake closed, orchestrator stopping");
    }

    pub async fn handle_event(&self, event: OnboardingEvent) {
        let mut state = self.state.lock().await;
        debug!(?event, "handling event");

        match event {
            OnboardingEvent::AttributionSucceeded { raw } => {
                if self.gate.on_success(&mut state, &raw) == GateOutcome::Completed {
                    self.fetcher.start(&mut state, &self.device);
                }
                self.evaluate(&mut state).await;
            }
            OnboardingEvent::AttributionFailed { error } => {
                if self.gate.on_failure(&mut state, &error) == GateOutcome::Completed {
                    self.fetcher.start(&mut state, &self.device);
                }
                self.evaluate(&mut state).await;
            }
            OnboardingEvent::OrganicRefetchCompleted { result } => {
                self.gate.on_refetch_completed(&mut state, result);
                self.fetcher.start(&mut state, &self.device);
                self.evaluate(&mut state).await;
            }
            OnboardingEvent::PushTokenReceived { token } => {
                state.push_token = Some(token.clone());
                self.flush(self.store.save_push_token(&token).await);
                if state.consent.allows_data_send() {
                    self.register_token.spawn(&token, &self.device);
                }
                self.evaluate(&mut state).await;
            }
            OnboardingEvent::PushMessageReceived { payload } => {
                let opened = payload.opened;
                let message_id = payload.message_id.clone();
                if self.interceptor.intercept(&mut state, payload) {
                    self.flush(
                        self.store
                            .save_pending_push(state.pending_deep_link.as_ref())
                            .await,
                    );
                }
                if opened {
                    if let Some(id) = message_id {
                        self.send_interaction.spawn(&id, InteractionKind::PushClick);
                    }
                }
                self.evaluate(&mut state).await;
            }
            OnboardingEvent::AllowClicked => {
                self.prompt.hide().await;
                // Provisional until the platform permission resolves.
                self.consent.on_allow(&mut state);
            }
            OnboardingEvent::SkipClicked => {
                self.prompt.hide().await;
                self.consent.on_skip(&mut state, self.clock.now());
                self.flush(
                    self.store
                        .save_consent(state.consent, state.skip_deadline)
                        .await,
                );
                self.evaluate(&mut state).await;
            }
            OnboardingEvent::PermissionResolved { outcome } => {
                self.consent
                    .on_permission_resolved(&mut state, outcome, self.clock.now());
                self.flush(
                    self.store
                        .save_consent(state.consent, state.skip_deadline)
                        .await,
                );
                if state.consent == ConsentStatus::Granted {
                    if let Err(e) = self.messaging.enable_registration().await {
                        warn!(error = %e, "push registration enable failed");
                    }
                    if let Some(token) = state.push_token.clone() {
                        self.register_token.spawn(&token, &self.device);
                    }
                }
                self.evaluate(&mut state).await;
            }
            OnboardingEvent::ConfigFetchCompleted { result } => {
                self.absorb_fetch_result(&mut state, result).await;
                self.evaluate(&mut state).await;
            }
            OnboardingEvent::AppForegrounded => {
                self.evaluate(&mut state).await;
            }
            OnboardingEvent::OrientationChanged { orientation } => {
                *self.orientation.lock().unwrap() = orientation;
                // Re-select the prompt variant while it is on screen.
                if state.prompt_open {
                    self.prompt.show(orientation).await;
                }
            }
            OnboardingEvent::SessionEnding => {
                // Sent at most once per recorded message id, and only
                // with data-sending consent.
                if state.consent.allows_data_send() {
                    if let Some(id) = state.last_message_id.take() {
                        self.send_interaction.spawn(&id, InteractionKind::SessionEnd);
                    }
                }
            }
        }
    }

    async fn absorb_fetch_result(
        &self,
        state: &mut OnboardingState,
        result: Result<ConfigResponse, FetchError>,
    ) {
        let failure = match result {
            Ok(response) => match response.url.as_deref() {
                Some(url) if response.ok && !url.is_empty() => {
                    state.fetch_phase = FetchPhase::Succeeded;
                    state.content_locator = Some(url.to_string());
                    state.last_fetch_failed = false;
                    self.flush(self.store.save_content_locator(url).await);
                    self.flush(self.store.save_config_failed(false).await);
                    if let Some(expires) = response.expires {
                        debug!(expires, "config carries advisory expiry");
                    }
                    return;
                }
                _ => FetchError::Rejected,
            },
            Err(e) => e,
        };

        // Failed fetch: keep the previous locator, record the flag for
        // the platform layer, and do not retry.
        warn!(error = %failure, "config fetch failed");
        state.fetch_phase = FetchPhase::Failed;
        state.last_fetch_failed = true;
        self.flush(self.store.save_config_failed(true).await);
    }

    /// Re-run the decision function and execute its outcome.
    async fn evaluate(&self, state: &mut OnboardingState) {
        self.maybe_send_profile(state).await;

        let now = self.clock.now();
        let orientation = *self.orientation.lock().unwrap();
        match decision::evaluate(state, now, orientation) {
            Presentation::DeepLink { .. } => {
                // The one guarded consumption point per cycle.
                let Some(link) = self.interceptor.consume(state) else {
                    return;
                };
                self.flush(self.store.save_pending_push(None).await);
                self.close_prompt(state).await;
                state.content_presented = true;
                info!(url = %link.url, "presenting deep-link content");
                if let Err(e) = self.renderer.display(&link.url).await {
                    warn!(error = %e, "renderer rejected deep link");
                }
            }
            Presentation::Content { locator } => {
                self.close_prompt(state).await;
                state.content_presented = true;
                info!("presenting content");
                if let Err(e) = self.renderer.display(&locator).await {
                    warn!(error = %e, "renderer rejected content");
                }
            }
            Presentation::Prompt { orientation } => {
                if !state.prompt_open {
                    state.prompt_open = true;
                    self.prompt.show(orientation).await;
                }
            }
            Presentation::Wait => {}
        }
    }

    async fn maybe_send_profile(&self, state: &mut OnboardingState) {
        if !state.should_send_profile() {
            return;
        }
        // Guard flips before the async send so re-entrant completions
        // cannot double-fire.
        state.profile_sent = true;
        self.flush(self.store.save_profile_sent().await);
        if let Some(token) = &state.push_token {
            self.send_profile
                .spawn(state.attribution.as_ref(), &self.device, token);
        }
    }

    async fn close_prompt(&self, state: &mut OnboardingState) {
        if state.prompt_open {
            state.prompt_open = false;
            self.prompt.hide().await;
        }
    }

    /// Flag writes are never fatal; a failed flush costs restart
    /// resumability, not this session's correctness.
    fn flush(&self, result: Result<(), FlagStoreError>) {
        if let Err(e) = result {
            warn!(error = %e, "flag write failed");
        }
    }
}
