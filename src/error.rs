//! Error types for the bar runtime.

use thiserror::Error;

/// Errors raised by the bar's own orchestration logic.
///
/// Faults that originate inside module code never become a `BarError`;
/// they are contained at the module task boundary.
#[derive(Debug, Error)]
pub enum BarError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode status: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Identifier space exhausted: {used} identifiers of length {len} in use")]
    IdSpaceExhausted { len: usize, used: usize },
    #[error("Bar has already been started")]
    AlreadyStarted,
    #[error("Unsupported stop signal: {0}")]
    UnknownSignal(i32),
}

/// Errors a module reports back to the runtime.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("module '{0}' does not implement run()")]
    Unimplemented(String),
    #[error("module panicked: {0}")]
    Panicked(String),
}

/// Result alias for orchestration code.
pub type BarResult<T> = Result<T, BarError>;
