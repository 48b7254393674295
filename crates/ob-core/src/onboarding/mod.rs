//! Onboarding flow domain: state, events and the decision function.

pub mod decision;
pub mod event;
pub mod state;

pub use decision::{evaluate, Presentation};
pub use event::OnboardingEvent;
pub use state::{FetchPhase, OnboardingState};
