//! High-RPM boost taper

use crate::math::map;
use turbofix_profile::TurboSettings;

/// Lowers `boost` to the falloff ceiling near the rev limit.
///
/// Active only when `falloff_rpm > rpm_spool_end` and `rpm >= falloff_rpm`.
/// The ceiling runs linearly from `max_boost` at `falloff_rpm` to
/// `falloff_boost` at full RPM. Boost is never raised.
#[inline]
pub fn apply_falloff(turbo: &TurboSettings, rpm: f32, boost: f32) -> f32 {
    if !turbo.falloff_active() || rpm < turbo.falloff_rpm {
        return boost;
    }

    let ceiling = map(rpm, turbo.falloff_rpm, 1.0, turbo.max_boost, turbo.falloff_boost);
    if boost > ceiling { ceiling } else { boost }
}
