//! Onboarding state.
//!
//! Owned exclusively by the orchestrator and mutated only through its
//! event handling; everything restart-relevant is flushed to the flag
//! store on mutation. The struct itself is process-lifetime state, the
//! store is the durable source of truth.

use chrono::{DateTime, Utc};

use crate::attribution::AttributionSnapshot;
use crate::consent::ConsentStatus;
use crate::deeplink::PendingDeepLink;

/// Progress of the remote config fetch within this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    NotStarted,
    /// Exactly one request outstanding; further calls are ignored.
    InFlight,
    Succeeded,
    Failed,
}

/// The orchestrator's view of the world.
#[derive(Debug, Clone, Default)]
pub struct OnboardingState {
    /// Recorded consent decision (persisted).
    pub consent: ConsentStatus,
    /// Cooldown deadline set on a temporary denial (persisted).
    /// Always `None` when consent is Granted or DeniedPermanent.
    pub skip_deadline: Option<DateTime<Utc>>,
    /// Attribution snapshot; `None` until the first callback.
    pub attribution: Option<AttributionSnapshot>,
    /// Last known push token (persisted).
    pub push_token: Option<String>,
    /// Deep link captured from an opened push (persisted until
    /// consumed).
    pub pending_deep_link: Option<PendingDeepLink>,
    /// Last known good content locator (persisted).
    pub content_locator: Option<String>,
    /// Whether the last config fetch failed (persisted; consumed by
    /// platform-level behavior).
    pub last_fetch_failed: bool,
    /// Idempotence guard: the profile side effect fires once per
    /// install (persisted).
    pub profile_sent: bool,

    // Session-only state below; never persisted.
    /// Message id recorded for interaction telemetry, cleared when the
    /// session-end event is sent.
    pub last_message_id: Option<String>,
    /// Config fetch progress this session.
    pub fetch_phase: FetchPhase,
    /// Whether the organic re-fetch has already been scheduled.
    pub organic_refetch_scheduled: bool,
    /// Whether the consent prompt is currently on screen.
    pub prompt_open: bool,
    /// Terminal condition: once content is shown, prompt visibility is
    /// no longer re-evaluated; only a fresh deep link redirects.
    pub content_presented: bool,
}

impl OnboardingState {
    /// Consent as seen by the decision algorithm at `now` (lazy
    /// cooldown expiry).
    pub fn effective_consent(&self, now: DateTime<Utc>) -> ConsentStatus {
        self.consent.effective(now, self.skip_deadline)
    }

    /// Record a consent decision, maintaining the invariant that the
    /// skip deadline only exists alongside a temporary denial.
    pub fn record_consent(&mut self, status: ConsentStatus, deadline: Option<DateTime<Utc>>) {
        debug_assert!(deadline.is_none() || status == ConsentStatus::DeniedTemporary);
        self.consent = status;
        self.skip_deadline = match status {
            ConsentStatus::DeniedTemporary => deadline,
            _ => None,
        };
    }

    /// Whether the user-profile side effect should fire now: consent
    /// granted, attribution and token both known, not yet sent.
    pub fn should_send_profile(&self) -> bool {
        self.consent.allows_data_send()
            && self.attribution.is_some()
            && self.push_token.is_some()
            && !self.profile_sent
    }
}
