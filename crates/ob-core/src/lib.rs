//! # ob-core
//!
//! Core domain models and business logic for the onboarding flow.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the onboarding state, the decision function that picks
//! what to present next, and the port traits implemented by the
//! infrastructure and network layers.

// Public module exports
pub mod attribution;
pub mod config;
pub mod consent;
pub mod deeplink;
pub mod device;
pub mod error;
pub mod onboarding;
pub mod ports;
pub mod profile;

// Re-export commonly used types at the crate root
pub use attribution::AttributionSnapshot;
pub use config::AppConfig;
pub use consent::{ConsentStatus, PermissionOutcome};
pub use deeplink::{PendingDeepLink, PushPayload};
pub use device::{DeviceMetadata, Orientation};
pub use error::FetchError;
pub use onboarding::{FetchPhase, OnboardingEvent, OnboardingState, Presentation};
pub use profile::UserProfile;
