//! Error types shared by the service crates.

use thiserror::Error;

/// Errors from a persistence backend behind a store trait.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not serve the request.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors from a remote service call.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The call never reached the remote service, or the connection dropped.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The remote service received the request and rejected it.
    #[error("request rejected: {0}")]
    Rejected(String),
}
