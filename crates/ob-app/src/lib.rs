//! # ob-app
//!
//! Application layer for the onboarding flow: the orchestrator that
//! owns the state and the use cases it drives. Everything here talks
//! to the outside world exclusively through the `ob-core` ports.

pub mod usecases;

#[cfg(test)]
pub(crate) mod testutil;

pub use usecases::orchestrator::{OnboardingOrchestrator, OrchestratorPorts};
pub use usecases::state_store::StateStore;
