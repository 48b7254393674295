//! The decision function.
//!
//! Pure evaluation of "what should the app present next" over the full
//! onboarding state. Re-run on every completion event; correctness
//! comes from re-evaluating the whole state each time, not from
//! sequencing, so it must stay idempotent and side-effect free. The
//! orchestrator executes the returned presentation and performs the
//! deep-link consumption and flag writes.

use chrono::{DateTime, Utc};

use crate::device::Orientation;

use super::state::{FetchPhase, OnboardingState};

/// What the app should present next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Present the pending deep link's url directly, bypassing
    /// everything else.
    DeepLink { url: String },
    /// Show fetched (or last known good) content.
    Content { locator: String },
    /// Show the consent prompt in the given variant.
    Prompt { orientation: Orientation },
    /// Nothing observable yet; keep waiting for completions.
    Wait,
}

/// Evaluate the decision algorithm at `now`.
///
/// Order is significant: deep link first, then the fetch gate, then
/// consent. A pending deep link always wins regardless of consent or
/// fetch state.
pub fn evaluate(
    state: &OnboardingState,
    now: DateTime<Utc>,
    orientation: Orientation,
) -> Presentation {
    // 1. Deep link short-circuits everything.
    if let Some(link) = &state.pending_deep_link {
        return Presentation::DeepLink {
            url: link.url.clone(),
        };
    }

    // Terminal condition: once content is on screen only a fresh deep
    // link (handled above) can change what is presented.
    if state.content_presented {
        return Presentation::Wait;
    }

    // 2. No prompt before content is known to be fetchable. A failed
    // fetch falls through using the persisted last-known locator.
    match state.fetch_phase {
        FetchPhase::Succeeded | FetchPhase::Failed => {}
        FetchPhase::NotStarted | FetchPhase::InFlight => return Presentation::Wait,
    }

    // 3–5. Consent gates content vs. prompt.
    if !state.effective_consent(now).allows_display() {
        return Presentation::Prompt { orientation };
    }
    match &state.content_locator {
        Some(locator) => Presentation::Content {
            locator: locator.clone(),
        },
        // Nothing was ever fetched; presenting nothing is
        // meaningless, so keep waiting.
        None => Presentation::Wait,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::ConsentStatus;
    use crate::deeplink::PendingDeepLink;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-02-01T09:00:00Z".parse().unwrap()
    }

    fn fetched_state() -> OnboardingState {
        OnboardingState {
            fetch_phase: FetchPhase::Succeeded,
            content_locator: Some("https://content".into()),
            ..Default::default()
        }
    }

    fn pending(url: &str) -> Option<PendingDeepLink> {
        Some(PendingDeepLink {
            url: url.into(),
            message_id: Some("m1".into()),
        })
    }

    // =========================================================================
    // Deep-link priority
    // =========================================================================

    #[test]
    fn deep_link_beats_everything() {
        // Any consent/fetch combination: the deep link still wins.
        for consent in [
            ConsentStatus::Undecided,
            ConsentStatus::Granted,
            ConsentStatus::DeniedTemporary,
            ConsentStatus::DeniedPermanent,
        ] {
            for phase in [
                FetchPhase::NotStarted,
                FetchPhase::InFlight,
                FetchPhase::Succeeded,
                FetchPhase::Failed,
            ] {
                let state = OnboardingState {
                    consent,
                    fetch_phase: phase,
                    pending_deep_link: pending("https://x"),
                    content_locator: Some("https://other".into()),
                    ..Default::default()
                };
                assert_eq!(
                    evaluate(&state, now(), Orientation::Portrait),
                    Presentation::DeepLink {
                        url: "https://x".into()
                    }
                );
            }
        }
    }

    #[test]
    fn deep_link_redirects_even_after_content_shown() {
        let state = OnboardingState {
            content_presented: true,
            pending_deep_link: pending("https://x"),
            ..fetched_state()
        };
        assert!(matches!(
            evaluate(&state, now(), Orientation::Portrait),
            Presentation::DeepLink { .. }
        ));
    }

    // =========================================================================
    // Fetch gate
    // =========================================================================

    #[test]
    fn nothing_shown_while_fetch_pending() {
        for phase in [FetchPhase::NotStarted, FetchPhase::InFlight] {
            let state = OnboardingState {
                fetch_phase: phase,
                consent: ConsentStatus::Granted,
                content_locator: Some("https://content".into()),
                ..Default::default()
            };
            assert_eq!(
                evaluate(&state, now(), Orientation::Portrait),
                Presentation::Wait
            );
        }
    }

    #[test]
    fn failed_fetch_falls_back_to_stored_locator() {
        let state = OnboardingState {
            fetch_phase: FetchPhase::Failed,
            consent: ConsentStatus::Granted,
            content_locator: Some("https://previous".into()),
            last_fetch_failed: true,
            ..Default::default()
        };
        assert_eq!(
            evaluate(&state, now(), Orientation::Portrait),
            Presentation::Content {
                locator: "https://previous".into()
            }
        );
    }

    #[test]
    fn failed_fetch_without_locator_waits() {
        let state = OnboardingState {
            fetch_phase: FetchPhase::Failed,
            consent: ConsentStatus::Granted,
            ..Default::default()
        };
        assert_eq!(
            evaluate(&state, now(), Orientation::Portrait),
            Presentation::Wait
        );
    }

    #[test]
    fn failed_fetch_with_undecided_consent_still_prompts() {
        let state = OnboardingState {
            fetch_phase: FetchPhase::Failed,
            ..Default::default()
        };
        assert!(matches!(
            evaluate(&state, now(), Orientation::Landscape),
            Presentation::Prompt {
                orientation: Orientation::Landscape
            }
        ));
    }

    // =========================================================================
    // Consent gating and cooldown expiry
    // =========================================================================

    #[test]
    fn granted_and_denied_permanent_show_content() {
        for consent in [ConsentStatus::Granted, ConsentStatus::DeniedPermanent] {
            let state = OnboardingState {
                consent,
                ..fetched_state()
            };
            assert_eq!(
                evaluate(&state, now(), Orientation::Portrait),
                Presentation::Content {
                    locator: "https://content".into()
                }
            );
        }
    }

    #[test]
    fn unexpired_skip_shows_content_without_prompt() {
        let state = OnboardingState {
            consent: ConsentStatus::DeniedTemporary,
            skip_deadline: Some(now() + Duration::days(2)),
            ..fetched_state()
        };
        assert_eq!(
            evaluate(&state, now(), Orientation::Portrait),
            Presentation::Content {
                locator: "https://content".into()
            }
        );
    }

    #[test]
    fn expired_skip_prompts_again() {
        let deadline = now() - Duration::days(1);
        let state = OnboardingState {
            consent: ConsentStatus::DeniedTemporary,
            skip_deadline: Some(deadline),
            ..fetched_state()
        };
        assert_eq!(
            evaluate(&state, now(), Orientation::Portrait),
            Presentation::Prompt {
                orientation: Orientation::Portrait
            }
        );
        // Exactly at the deadline counts as expired.
        let state = OnboardingState {
            skip_deadline: Some(now()),
            ..state
        };
        assert!(matches!(
            evaluate(&state, now(), Orientation::Portrait),
            Presentation::Prompt { .. }
        ));
    }

    #[test]
    fn undecided_prompts_with_current_orientation() {
        let state = fetched_state();
        assert_eq!(
            evaluate(&state, now(), Orientation::Landscape),
            Presentation::Prompt {
                orientation: Orientation::Landscape
            }
        );
    }

    // =========================================================================
    // Idempotence / terminal condition
    // =========================================================================

    #[test]
    fn evaluation_is_idempotent() {
        let state = OnboardingState {
            consent: ConsentStatus::Granted,
            ..fetched_state()
        };
        let first = evaluate(&state, now(), Orientation::Portrait);
        let second = evaluate(&state, now(), Orientation::Portrait);
        assert_eq!(first, second);
    }

    #[test]
    fn no_reevaluation_after_content_presented() {
        let state = OnboardingState {
            content_presented: true,
            // Even with an expired skip, no prompt comes back.
            consent: ConsentStatus::DeniedTemporary,
            skip_deadline: Some(now() - Duration::days(1)),
            ..fetched_state()
        };
        assert_eq!(
            evaluate(&state, now(), Orientation::Portrait),
            Presentation::Wait
        );
    }
}
