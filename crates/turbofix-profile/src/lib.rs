//! Turbo tuning profiles and profile resolution
//!
//! This crate provides the tuning record applied to a vehicle, the identity
//! key used to match a record against a vehicle (model + plate), the ordered
//! profile collection with its reserved default, and the store contract the
//! host persistence layer implements.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod identity;
pub mod resolve;
pub mod set;
pub mod store;
pub mod types;
pub mod validation;

pub use identity::*;
pub use resolve::*;
pub use set::*;
pub use store::*;
pub use types::*;
pub use validation::*;

use thiserror::Error;

/// Name of the reserved fallback profile.
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Highest gear number a boost-by-gear table may hold.
pub const MAX_GEAR: u8 = 10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Failed to save profile {profile}: {reason}")]
    SaveFailed { profile: String, reason: String },

    #[error("Failed to load profiles: {0}")]
    LoadFailed(String),
}

pub type ProfileResult<T> = Result<T, ProfileError>;

/// Returns true if `name` is the reserved default profile name.
pub fn is_default_name(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(DEFAULT_PROFILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name_is_case_insensitive() {
        assert!(is_default_name("default"));
        assert!(is_default_name("Default"));
        assert!(is_default_name(" DEFAULT "));
        assert!(!is_default_name("defaults"));
    }

    #[test]
    fn test_error_display_save_failed() {
        let err = ProfileError::SaveFailed {
            profile: "gt500".to_string(),
            reason: "disk full".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gt500"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_error_display_not_found() {
        let err = ProfileError::NotFound("rally".to_string());
        assert!(err.to_string().contains("rally"));
    }
}
