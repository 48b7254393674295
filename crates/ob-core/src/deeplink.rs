//! Push payloads and pending deep links.

use serde::{Deserialize, Serialize};

/// A push message as delivered by the messaging collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    /// Deep-link target carried in the message data, if any.
    pub url: Option<String>,
    /// Campaign message id from the message data; falls back to the
    /// transport-level id when absent.
    pub message_id: Option<String>,
    /// Whether the user opened the notification (vs. a silent
    /// foreground delivery).
    pub opened: bool,
}

impl PushPayload {
    /// The pending deep link this message produces, if any.
    ///
    /// Only opened messages with a non-empty url short-circuit the
    /// startup flow.
    pub fn into_pending(self) -> Option<PendingDeepLink> {
        if !self.opened {
            return None;
        }
        match self.url {
            Some(url) if !url.is_empty() => Some(PendingDeepLink {
                url,
                message_id: self.message_id,
            }),
            _ => None,
        }
    }
}

/// A deep link captured from an opened push, awaiting consumption.
///
/// Last-opened-wins; there is no queue. Cleared exactly once when
/// consumed to drive content display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDeepLink {
    pub url: String,
    pub message_id: Option<String>,
}
