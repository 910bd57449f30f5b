// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all posture-engine failures.
///
/// A `DENY` or `ABSTAIN` verdict is NOT an error: both are valid
/// terminal classifications carried in the step records. Errors are
/// reserved for invalid configuration (caught before any step runs)
/// and for trace persistence failures.
#[derive(Error, Debug)]
pub enum PostureError {
    /// Invalid configuration (bounds, step counts, block counts).
    /// Detected before the run starts; never retried.
    #[error("config error: {0}")]
    Config(String),

    /// Trace recorder failed to persist a step record.
    #[error("trace error: {0}")]
    Trace(String),
}

pub type PostureResult<T> = Result<T, PostureError>;
