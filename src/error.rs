//! Error types for loading models and selecting renderers.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for luadoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading model or signature input.
///
/// Matching and rendering never fail: a mismatch is `false` / an empty block.
#[derive(Debug, Error)]
pub enum Error {
    /// Input was not valid JSON for the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output format name not recognized.
    #[error("unknown format: {0}. Use emmylua or json")]
    UnknownFormat(String),
}
