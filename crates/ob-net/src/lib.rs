//! # ob-net
//!
//! Outbound HTTP adapters implementing the `ob-core` endpoint ports
//! with reqwest. Every failure maps onto the typed `FetchError`
//! taxonomy: request/connection problems become `Transport`, malformed
//! bodies become `Parse`. Nothing here retries; retry policy (or the
//! absence of one) belongs to the callers.

mod config_client;
mod install_data_client;
mod interaction_client;
mod profile_client;

pub use config_client::HttpConfigClient;
pub use install_data_client::HttpInstallDataClient;
pub use interaction_client::HttpInteractionClient;
pub use profile_client::HttpProfileClient;

use ob_core::error::FetchError;

pub(crate) fn transport_err(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.to_string())
}

/// Turn a non-2xx response into a transport failure, keeping the
/// status code in the message for the logs.
pub(crate) fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    match response.error_for_status() {
        Ok(resp) => Ok(resp),
        Err(err) => Err(transport_err(err)),
    }
}
