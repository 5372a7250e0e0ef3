//! Widget error type.
//!
//! Most widget failures never reach the shopper: a bad stored cart resets to
//! empty and a failed write is logged while the in-memory cart stays
//! authoritative. `WidgetError` is what the fallible building blocks return
//! so callers can decide which of those policies applies.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Errors raised by the cart widget.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Reading or writing client storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Encoding or decoding stored JSON failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A view template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, WidgetError>;
