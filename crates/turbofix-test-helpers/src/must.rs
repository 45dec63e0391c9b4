//! Unwrap helpers for tests.
//!
//! They replace `unwrap()` and `expect()` in test code. Each carries
//! `#[track_caller]` so a failure points at the calling test line.

use std::fmt::Debug;

/// Unwrap a `Result`, panicking with the error value on `Err`.
///
/// ```rust
/// use turbofix_test_helpers::must;
///
/// let result: Result<f32, &str> = Ok(0.5);
/// assert!((must(result) - 0.5).abs() < f32::EPSILON);
/// ```
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap an `Option`, panicking with `msg` on `None`.
///
/// ```rust
/// use turbofix_test_helpers::must_some;
///
/// let gear = must_some(Some(3u8), "expected a gear");
/// assert_eq!(gear, 3);
/// ```
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

/// Unwrap a `Result`, panicking with `context` and the error value on `Err`.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}
