//! Consent status machine.
//!
//! Persisted as one of four variants; the prompt-on-screen phase is a
//! transient tracked by the orchestrator, not a stored status. A
//! temporary denial expires lazily: any "effective status" read treats
//! it as `Undecided` once the deadline has passed, without mutating
//! stored state until the user is actually re-prompted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The user's recorded notification-consent decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsentStatus {
    /// No decision recorded yet.
    Undecided,
    /// User allowed and (where required) the platform granted the
    /// permission.
    Granted,
    /// User skipped, or the platform denied but may ask again; expires
    /// after the skip cooldown.
    DeniedTemporary,
    /// Platform denied with "don't ask again" semantics. Content is
    /// still shown, but data-sending consent stays false forever.
    DeniedPermanent,
}

impl Default for ConsentStatus {
    fn default() -> Self {
        Self::Undecided
    }
}

impl ConsentStatus {
    /// Status as seen by the decision algorithm at `now`.
    ///
    /// An expired temporary denial reads as `Undecided` for prompting
    /// purposes; a `DeniedTemporary` with no recorded deadline is
    /// treated as expired (a crash between the two flag writes must
    /// not suppress the prompt forever).
    pub fn effective(self, now: DateTime<Utc>, skip_deadline: Option<DateTime<Utc>>) -> Self {
        match (self, skip_deadline) {
            (Self::DeniedTemporary, Some(deadline)) if now < deadline => Self::DeniedTemporary,
            (Self::DeniedTemporary, _) => Self::Undecided,
            (status, _) => status,
        }
    }

    /// Whether content may be shown without prompting first.
    pub fn allows_display(self) -> bool {
        !matches!(self, Self::Undecided)
    }

    /// Whether the user-profile side effect may fire. Only a real
    /// grant consents to data-sending; a permanent denial does not,
    /// even though it displays content.
    pub fn allows_data_send(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Outcome of a platform permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    /// Denied, but the platform will allow asking again.
    DeniedCanAsk,
    /// Denied with "don't ask again" semantics.
    DeniedPermanent,
    /// No platform permission API on this target.
    Unavailable,
}

impl PermissionOutcome {
    /// Map the platform outcome onto a recorded consent status.
    ///
    /// `Unavailable` behaves like a permanent denial downstream:
    /// content is shown, data-sending consent is not granted.
    pub fn into_status(self) -> ConsentStatus {
        match self {
            Self::Granted => ConsentStatus::Granted,
            Self::DeniedCanAsk => ConsentStatus::DeniedTemporary,
            Self::DeniedPermanent | Self::Unavailable => ConsentStatus::DeniedPermanent,
        }
    }
}
