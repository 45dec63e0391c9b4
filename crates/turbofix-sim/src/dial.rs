//! Dashboard Dial Mapping
//!
//! Converts a boost pressure into the two gauge signals a dashboard exposes.

use crate::math::{clamp, map};
use turbofix_profile::TurboProfile;

/// Gauge values for the dashboard bridge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DialSignals {
    /// Boost gauge signal
    pub boost: f32,
    /// Vacuum gauge signal; zero in combined mode
    pub vacuum: f32,
}

/// Map a boost pressure onto gauge signals using the profile's dial settings.
///
/// In combined mode (`boost_includes_vacuum`) the boost dial swings from -1 at
/// `min_boost` to 1 at `max_boost`, each side scaled by its own scale, and the
/// vacuum signal is zero. In separate mode each signal is bounded to `[0, 1]`
/// before its scale and offset are applied.
///
/// # Example
///
/// ```
/// use turbofix_profile::TurboProfile;
/// use turbofix_sim::map_dial;
///
/// let profile = TurboProfile::default_profile();
/// let signals = map_dial(0.5, &profile);
/// assert!((signals.boost - 0.5).abs() < 1e-6);
/// assert!((signals.vacuum - 1.0).abs() < 1e-6);
/// ```
pub fn map_dial(boost: f32, profile: &TurboProfile) -> DialSignals {
    let turbo = &profile.turbo;
    let dial = &profile.dial;

    if dial.boost_includes_vacuum {
        let swing = if boost >= 0.0 {
            map(boost, 0.0, turbo.max_boost, 0.0, 1.0) * dial.boost_scale
        } else {
            map(boost, turbo.min_boost, 0.0, -1.0, 0.0) * dial.vacuum_scale
        };
        return DialSignals {
            boost: swing + dial.boost_offset,
            vacuum: 0.0,
        };
    }

    let boost_signal = clamp(map(boost, 0.0, turbo.max_boost, 0.0, 1.0), 0.0, 1.0);
    let vacuum_signal = clamp(map(boost, turbo.min_boost, 0.0, 0.0, 1.0), 0.0, 1.0);

    DialSignals {
        boost: boost_signal * dial.boost_scale + dial.boost_offset,
        vacuum: vacuum_signal * dial.vacuum_scale + dial.vacuum_offset,
    }
}
