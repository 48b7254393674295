pub mod attribution_gate;
pub mod config_fetcher;
pub mod consent_controller;
pub mod deeplink_interceptor;
pub mod interaction;
pub mod orchestrator;
pub mod register_token;
pub mod send_profile;
pub mod state_store;

pub use attribution_gate::AttributionGate;
pub use config_fetcher::ConfigFetcher;
pub use consent_controller::ConsentController;
pub use deeplink_interceptor::DeepLinkInterceptor;
pub use interaction::SendInteraction;
pub use orchestrator::OnboardingOrchestrator;
pub use register_token::RegisterPushToken;
pub use send_profile::SendUserProfile;
pub use state_store::StateStore;
