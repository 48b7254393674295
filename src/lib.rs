//! Onboard
//!
//! Client-side onboarding coordination for a mobile app: gates remote
//! content behind attribution, push-token, consent and remote-config
//! signals, and survives process restarts. The embedding platform
//! layer supplies the UI surfaces; this crate supplies everything
//! else.

pub mod context;
pub mod logging;
pub mod settings;

pub use context::{AppContext, AppContextBuilder};
pub use ob_app::OnboardingOrchestrator;
pub use ob_core::{
    AppConfig, ConsentStatus, DeviceMetadata, OnboardingEvent, Orientation, PermissionOutcome,
    PushPayload,
};
