//! Interaction telemetry side effect (fire-and-forget).

use std::sync::Arc;

use tracing::{debug, warn};

use ob_core::ports::{ClockPort, InteractionEndpointPort, InteractionKind};

pub struct SendInteraction {
    endpoint: Arc<dyn InteractionEndpointPort>,
    clock: Arc<dyn ClockPort>,
}

impl SendInteraction {
    pub fn new(endpoint: Arc<dyn InteractionEndpointPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { endpoint, clock }
    }

    pub fn spawn(&self, message_id: &str, kind: InteractionKind) {
        let endpoint = self.endpoint.clone();
        let at = self.clock.now();
        let message_id = message_id.to_string();
        tokio::spawn(async move {
            match endpoint.send_interaction(&message_id, kind, at).await {
                Ok(()) => debug!(message_id, ?kind, "interaction event sent"),
                Err(e) => warn!(message_id, ?kind, error = %e, "interaction event failed"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FixedClock, RecordingInteractionEndpoint};

    #[tokio::test]
    async fn test_interaction_is_stamped_with_clock_time() {
        let endpoint = Arc::new(RecordingInteractionEndpoint::default());
        let now = "2026-08-30T12:00:00Z".parse().unwrap();
        let use_case = SendInteraction::new(endpoint.clone(), Arc::new(FixedClock::at(now)));

        use_case.spawn("m1", InteractionKind::PushClick);
        tokio::task::yield_now().await;

        let sent = endpoint.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "m1");
        assert_eq!(sent[0].1, InteractionKind::PushClick);
        assert_eq!(sent[0].2, now);
    }
}
