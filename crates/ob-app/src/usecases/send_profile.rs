//! User-profile side effect.
//!
//! Fire-and-forget: failures are logged, never retried. The
//! once-per-install guard (`profile_sent`) lives in the orchestrator's
//! state; this use case only composes and ships the body.

use std::sync::Arc;

use tracing::{info, warn};

use ob_core::attribution::AttributionSnapshot;
use ob_core::device::DeviceMetadata;
use ob_core::ports::{ClockPort, ProfileEndpointPort};
use ob_core::profile::UserProfile;

pub struct SendUserProfile {
    endpoint: Arc<dyn ProfileEndpointPort>,
    clock: Arc<dyn ClockPort>,
}

impl SendUserProfile {
    pub fn new(endpoint: Arc<dyn ProfileEndpointPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { endpoint, clock }
    }

    pub fn spawn(
        &self,
        attribution: Option<&AttributionSnapshot>,
        device: &DeviceMetadata,
        push_token: &str,
    ) {
        let profile = UserProfile::compose(attribution, device, push_token, self.clock.now());
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            match endpoint.send_profile(&profile).await {
                Ok(()) => info!("user profile sent"),
                Err(e) => warn!(error = %e, "user profile send failed"),
            }
        });
    }
}
