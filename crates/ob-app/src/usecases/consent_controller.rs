//! Consent controller.
//!
//! Owns the permission-prompt lifecycle: Allow is provisional until
//! the platform permission result arrives; Skip and the platform
//! denials record their status (and cooldown) immediately. No
//! permission outcome is ever fatal.

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

use ob_core::consent::ConsentStatus;
use ob_core::onboarding::{OnboardingEvent, OnboardingState};
use ob_core::ports::PermissionPort;

pub struct ConsentController {
    permission: Arc<dyn PermissionPort>,
    skip_cooldown: Duration,
    events: mpsc::Sender<OnboardingEvent>,
}

impl ConsentController {
    pub fn new(
        permission: Arc<dyn PermissionPort>,
        skip_cooldown: Duration,
        events: mpsc::Sender<OnboardingEvent>,
    ) -> Self {
        Self {
            permission,
            skip_cooldown,
            events,
        }
    }

    /// User tapped Allow. The grant stays provisional: the platform
    /// dialog resolves asynchronously and comes back as a
    /// `PermissionResolved` event.
    pub fn on_allow(&self, state: &mut OnboardingState) {
        state.prompt_open = false;
        debug!("allow tapped, requesting platform permission");

        let permission = self.permission.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = permission.request().await;
            if events
                .send(OnboardingEvent::PermissionResolved { outcome })
                .await
                .is_err()
            {
                debug!("orchestrator gone before permission resolved");
            }
        });
    }

    /// User tapped Skip: temporary denial with a fresh cooldown.
    pub fn on_skip(&self, state: &mut OnboardingState, now: chrono::DateTime<chrono::Utc>) {
        state.prompt_open = false;
        let deadline = now + self.skip_cooldown;
        info!(%deadline, "consent skipped");
        state.record_consent(ConsentStatus::DeniedTemporary, Some(deadline));
    }

    /// Platform permission dialog resolved.
    pub fn on_permission_resolved(
        &self,
        state: &mut OnboardingState,
        outcome: ob_core::consent::PermissionOutcome,
        now: chrono::DateTime<chrono::Utc>,
    ) {
        let status = outcome.into_status();
        info!(?outcome, ?status, "permission resolved");
        let deadline = match status {
            ConsentStatus::DeniedTemporary => Some(now + self.skip_cooldown),
            _ => None,
        };
        state.record_consent(status, deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::StubPermission;
    use chrono::{DateTime, Utc};
    use ob_core::consent::PermissionOutcome;

    fn t0() -> DateTime<Utc> {
        "2026-03-01T08:00:00Z".parse().unwrap()
    }

    fn controller(
        outcome: PermissionOutcome,
    ) -> (ConsentController, mpsc::Receiver<OnboardingEvent>) {
        let (tx, rx) = mpsc::channel(8);
        (
            ConsentController::new(Arc::new(StubPermission { outcome }), Duration::days(3), tx),
            rx,
        )
    }

    #[tokio::test]
    async fn test_allow_requests_permission_and_posts_outcome() {
        let (controller, mut rx) = controller(PermissionOutcome::Granted);
        let mut state = OnboardingState {
            prompt_open: true,
            ..Default::default()
        };

        controller.on_allow(&mut state);
        assert!(!state.prompt_open);
        // Not yet granted: provisional until the platform answers
        assert_eq!(state.consent, ConsentStatus::Undecided);

        match rx.recv().await.unwrap() {
            OnboardingEvent::PermissionResolved { outcome } => {
                assert_eq!(outcome, PermissionOutcome::Granted)
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_skip_sets_temporary_denial_with_cooldown() {
        let (controller, _rx) = controller(PermissionOutcome::Granted);
        let mut state = OnboardingState {
            prompt_open: true,
            ..Default::default()
        };

        controller.on_skip(&mut state, t0());

        assert_eq!(state.consent, ConsentStatus::DeniedTemporary);
        assert_eq!(state.skip_deadline, Some(t0() + Duration::days(3)));
        assert!(!state.prompt_open);
    }

    #[tokio::test]
    async fn test_permission_outcomes_record_expected_statuses() {
        let (controller, _rx) = controller(PermissionOutcome::Granted);

        let mut state = OnboardingState::default();
        controller.on_permission_resolved(&mut state, PermissionOutcome::Granted, t0());
        assert_eq!(state.consent, ConsentStatus::Granted);
        assert!(state.skip_deadline.is_none());

        let mut state = OnboardingState::default();
        controller.on_permission_resolved(&mut state, PermissionOutcome::DeniedCanAsk, t0());
        assert_eq!(state.consent, ConsentStatus::DeniedTemporary);
        assert_eq!(state.skip_deadline, Some(t0() + Duration::days(3)));

        let mut state = OnboardingState::default();
        controller.on_permission_resolved(&mut state, PermissionOutcome::DeniedPermanent, t0());
        assert_eq!(state.consent, ConsentStatus::DeniedPermanent);
        assert!(state.skip_deadline.is_none());
    }

    #[tokio::test]
    async fn test_missing_permission_api_grants_display_only() {
        let (controller, _rx) = controller(PermissionOutcome::Unavailable);
        let mut state = OnboardingState::default();

        controller.on_permission_resolved(&mut state, PermissionOutcome::Unavailable, t0());

        assert!(state.consent.allows_display());
        assert!(!state.consent.allows_data_send());
    }
}
