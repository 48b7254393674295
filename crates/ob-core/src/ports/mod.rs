//! Port interfaces for the application layer.
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations, keeping the core business logic
//! independent of storage, timers and the network. Each port is
//! implemented by exactly one adapter in `ob-infra` or `ob-net`; the
//! UI-facing ports are implemented by the host application shell.

mod clock;
mod endpoints;
mod flag_store;
mod ui;

pub use clock::{ClockPort, DelayPort};
pub use endpoints::{
    ConfigEndpointPort, ConfigResponse, InstallDataPort, InteractionEndpointPort, InteractionKind,
    ProfileEndpointPort,
};
pub use flag_store::{keys, FlagStorePort};
pub use ui::{MessagingPort, PermissionPort, PromptPort, RendererPort};
