//! Events driving the onboarding flow.
//!
//! All four async signal sources plus app lifecycle feed this single
//! intake; components never observe each other directly.

use crate::attribution::AttributionSnapshot;
use crate::consent::PermissionOutcome;
use crate::deeplink::PushPayload;
use crate::device::Orientation;
use crate::error::FetchError;
use crate::ports::ConfigResponse;

/// An event delivered to the orchestrator's queue.
#[derive(Debug, Clone)]
pub enum OnboardingEvent {
    /// Initial attribution callback succeeded with the raw blob.
    AttributionSucceeded { raw: String },
    /// Initial attribution callback failed.
    AttributionFailed { error: String },
    /// The delayed organic re-fetch resolved.
    OrganicRefetchCompleted {
        result: Result<AttributionSnapshot, FetchError>,
    },
    /// The messaging collaborator rotated the push token.
    PushTokenReceived { token: String },
    /// A push message arrived (opened or silent).
    PushMessageReceived { payload: PushPayload },
    /// The user tapped Allow on the consent prompt.
    AllowClicked,
    /// The user tapped Skip on the consent prompt.
    SkipClicked,
    /// The platform permission dialog resolved.
    PermissionResolved { outcome: PermissionOutcome },
    /// The in-flight config fetch resolved.
    ConfigFetchCompleted {
        result: Result<ConfigResponse, FetchError>,
    },
    /// App came to the foreground (includes initial launch).
    AppForegrounded,
    /// Device orientation changed.
    OrientationChanged { orientation: Orientation },
    /// App is quitting or the main scene unloaded.
    SessionEnding,
}
