//! Push-token re-registration side effect.
//!
//! On a granted consent (or a token rotation while granted) the token
//! is re-announced to the config endpoint. Fire-and-forget.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use ob_core::device::DeviceMetadata;
use ob_core::ports::ConfigEndpointPort;

pub struct RegisterPushToken {
    endpoint: Arc<dyn ConfigEndpointPort>,
}

impl RegisterPushToken {
    pub fn new(endpoint: Arc<dyn ConfigEndpointPort>) -> Self {
        Self { endpoint }
    }

    pub fn spawn(&self, token: &str, device: &DeviceMetadata) {
        let body = Self::body(token, device);
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            match endpoint.register_token(&body).await {
                Ok(()) => debug!("push token registered"),
                Err(e) => warn!(error = %e, "push token registration failed"),
            }
        });
    }

    fn body(token: &str, device: &DeviceMetadata) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("push_token".into(), json!(token));
        body.insert("bundle_id".into(), json!(device.bundle_id));
        body.insert("af_id".into(), json!(device.af_id));
        if let Some(project_id) = &device.firebase_project_id {
            body.insert("firebase_project_id".into(), json!(project_id));
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_device, StubConfigEndpoint};

    #[tokio::test]
    async fn test_registration_body_shape() {
        let endpoint = Arc::new(StubConfigEndpoint::ok("unused"));
        let use_case = RegisterPushToken::new(endpoint.clone());

        use_case.spawn("tok-1", &test_device());
        tokio::task::yield_now().await;

        let bodies = endpoint.token_bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["push_token"], json!("tok-1"));
        assert_eq!(bodies[0]["bundle_id"], json!("com.example.app"));
        assert_eq!(bodies[0]["af_id"], json!("af-9000"));
        assert_eq!(bodies[0]["firebase_project_id"], json!("proj-1"));
    }
}
