//! Assertion macros for boost values.

/// Assert that two floats differ by at most `tolerance`.
///
/// ```rust
/// use turbofix_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(0.1087_f32, 0.10875_f32, 0.001_f32);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
}

/// Assert that `value` lies in the closed range `[lo, hi]`.
///
/// ```rust
/// use turbofix_test_helpers::assert_within;
///
/// assert_within!(0.4, -0.8, 1.0);
/// ```
#[macro_export]
macro_rules! assert_within {
    ($value:expr, $lo:expr, $hi:expr $(,)?) => {
        let value = $value;
        let lo = $lo;
        let hi = $hi;
        if !(lo <= value && value <= hi) {
            panic!(
                "assertion failed: `{:?}` not within [`{:?}`, `{:?}`]",
                value, lo, hi
            );
        }
    };
}
