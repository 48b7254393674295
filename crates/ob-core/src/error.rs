use thiserror::Error;

/// Failure of an outbound remote call.
///
/// Transport and parse failures are handled identically downstream
/// (fallback paths, never fatal); they stay separate variants so logs
/// can tell them apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Parse(String),

    /// The endpoint answered but declined to provide a usable payload
    /// (e.g. `ok=false` or a missing content locator).
    #[error("endpoint rejected the request")]
    Rejected,
}

/// Failure of the persistent flag store.
#[derive(Debug, Error)]
pub enum FlagStoreError {
    #[error("storage io error: {0}")]
    Io(String),

    #[error("stored value is not valid json: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for FlagStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FlagStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt(err.to_string())
    }
}
