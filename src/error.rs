//! Error types for the layoutmd library.

use std::io;
use thiserror::Error;

/// Result type alias for layoutmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading input or rendering output.
///
/// The layout pipeline itself never fails: every heuristic is best-effort
/// and skips silently when its pattern is absent. Errors only arise at the
/// edges, when reading a serialized parse result or emitting a dump.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading an input dump.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a valid serialized parse result.
    #[error("Invalid parse result: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}
