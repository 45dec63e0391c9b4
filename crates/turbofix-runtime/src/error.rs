//! Error types for runtime operations

use thiserror::Error;
use turbofix_profile::ProfileError;

/// Boost-limiter patch failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchError {
    /// The startup self-test could not locate the patch site
    #[error("Boost limiter patch self-test failed")]
    TestFailed,

    /// Engaging the patch failed
    #[error("Failed to apply boost limiter patch")]
    ApplyFailed,

    /// Releasing the patch failed
    #[error("Failed to restore boost limiter patch")]
    RestoreFailed,

    /// An earlier failure disabled the patch for this session
    #[error("Boost limiter patch disabled after an earlier failure")]
    Disabled,
}

/// Errors surfaced by [`VehicleRuntime`](crate::VehicleRuntime) operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Patch collaborator failure
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Profile store failure
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The operation needs an active player profile
    #[error("No active profile for the current vehicle")]
    NoActiveProfile,
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
