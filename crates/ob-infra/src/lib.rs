//! # ob-infra
//!
//! Infrastructure adapters: the file-backed flag store and the system
//! clock/timer implementations.

pub mod flag_store;
pub mod time;

pub use flag_store::FileFlagStore;
pub use time::{SystemClock, TokioDelay};
