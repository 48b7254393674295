//! Interaction telemetry client.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

use ob_core::error::FetchError;
use ob_core::ports::{InteractionEndpointPort, InteractionKind};

use crate::{check_status, transport_err};

/// POSTs a single key/timestamp pair to `/interaction/{messageId}`.
pub struct HttpInteractionClient {
    client: reqwest::Client,
    interaction_base_url: String,
}

impl HttpInteractionClient {
    pub fn new(client: reqwest::Client, interaction_base_url: impl Into<String>) -> Self {
        Self {
            client,
            interaction_base_url: interaction_base_url.into(),
        }
    }

    fn interaction_url(&self, message_id: &str) -> String {
        format!(
            "{}/interaction/{}",
            self.interaction_base_url.trim_end_matches('/'),
            message_id
        )
    }
}

#[async_trait]
impl InteractionEndpointPort for HttpInteractionClient {
    async fn send_interaction(
        &self,
        message_id: &str,
        kind: InteractionKind,
        at: DateTime<Utc>,
    ) -> Result<(), FetchError> {
        let body: HashMap<&str, String> = HashMap::from([(
            kind.key(),
            at.to_rfc3339_opts(SecondsFormat::Secs, true),
        )]);

        let response = self
            .client
            .post(self.interaction_url(message_id))
            .json(&body)
            .send()
            .await
            .map_err(transport_err)?;
        check_status(response)?;
        Ok(())
    }
}
