//! Crate error types.

use thiserror::Error;

/// Errors produced by the crate-owned binding store implementations.
///
/// Host-written [`BindingStore`](crate::binding::BindingStore) adapters are
/// free to surface their own error types through `anyhow`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("binding store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("binding document (de)serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
