//! Ports implemented by the host application shell.

use async_trait::async_trait;

use crate::consent::PermissionOutcome;
use crate::device::Orientation;

/// Rendering collaborator. The core never inspects rendering
/// internals; it only says when and with what payload to render.
#[async_trait]
pub trait RendererPort: Send + Sync {
    async fn display(&self, url: &str) -> anyhow::Result<()>;
    async fn hide(&self);
}

/// Consent prompt surface. `show` is also called on every
/// orientation change while the prompt remains open, so the shell can
/// swap the portrait/landscape variant.
#[async_trait]
pub trait PromptPort: Send + Sync {
    async fn show(&self, orientation: Orientation);
    async fn hide(&self);
}

/// Platform notification-permission dialog.
#[async_trait]
pub trait PermissionPort: Send + Sync {
    /// Request the runtime permission and resolve with the platform's
    /// answer. Implementations on targets without a permission API
    /// resolve with [`PermissionOutcome::Unavailable`].
    async fn request(&self) -> PermissionOutcome;
}

/// Push-messaging collaborator controls. Token and message delivery
/// arrive as orchestrator events, not through this port.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Enable token registration with the push transport. Tokens show
    /// up later as `PushTokenReceived` events.
    async fn enable_registration(&self) -> anyhow::Result<()>;
}
