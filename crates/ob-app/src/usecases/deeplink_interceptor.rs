//! Deep-link interceptor.
//!
//! Captures a push-opened payload before the normal startup flow runs.
//! Deep links take unconditional priority: the user's immediate intent
//! (opening a specific push) must never be blocked by an unrelated
//! prompt.

use tracing::debug;

use ob_core::deeplink::{PendingDeepLink, PushPayload};
use ob_core::onboarding::OnboardingState;

pub struct DeepLinkInterceptor;

impl DeepLinkInterceptor {
    /// Absorb a push message.
    ///
    /// Records the message id for interaction telemetry regardless of
    /// whether the message carries a deep link, then overwrites the
    /// pending link on an opened message with a url
    /// (last-opened-wins, no queueing). Returns true when a new
    /// pending deep link was captured.
    pub fn intercept(&self, state: &mut OnboardingState, payload: PushPayload) -> bool {
        if let Some(message_id) = &payload.message_id {
            state.last_message_id = Some(message_id.clone());
        }

        match payload.into_pending() {
            Some(pending) => {
                debug!(url = %pending.url, "captured deep link from opened push");
                state.pending_deep_link = Some(pending);
                true
            }
            None => false,
        }
    }

    /// Atomically read and clear the pending link.
    ///
    /// The single entry point guarded against double-handling: the
    /// orchestrator calls this at most once per evaluation cycle, and
    /// subsequent calls return `None` until a new push is opened.
    pub fn consume(&self, state: &mut OnboardingState) -> Option<PendingDeepLink> {
        state.pending_deep_link.take()
    }
}
