//! Read-only boost queries for external consumers

use crate::runtime::VehicleRuntime;
use turbofix_sim::math::map;

/// Player boost state as other scripts see it.
///
/// Every accessor returns `false` or `0.0` while the player has no active
/// profile.
pub trait TurboQuery {
    /// A profile is active and the simulation is enabled.
    fn is_active(&self) -> bool;

    /// Boost mapped from `[min_boost, max_boost]` onto `[-1, 1]`.
    fn normalized_boost(&self) -> f32;

    /// Boost of the player's vehicle as of the last tick.
    fn absolute_boost(&self) -> f32;

    fn boost_min(&self) -> f32;

    fn boost_max(&self) -> f32;
}

impl TurboQuery for VehicleRuntime {
    fn is_active(&self) -> bool {
        self.active_profile().is_some() && self.settings().main.enable
    }

    fn normalized_boost(&self) -> f32 {
        self.active_profile().map_or(0.0, |profile| {
            map(
                self.player_boost(),
                profile.turbo.min_boost,
                profile.turbo.max_boost,
                -1.0,
                1.0,
            )
        })
    }

    fn absolute_boost(&self) -> f32 {
        if self.active_profile().is_none() {
            return 0.0;
        }
        self.player_boost()
    }

    fn boost_min(&self) -> f32 {
        self.active_profile().map_or(0.0, |profile| profile.turbo.min_boost)
    }

    fn boost_max(&self) -> f32 {
        self.active_profile().map_or(0.0, |profile| profile.turbo.max_boost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuntimeSettings;
    use turbofix_profile::ProfileSet;

    #[test]
    fn test_inactive_runtime_reports_zero() {
        let runtime = VehicleRuntime::new(RuntimeSettings::default(), ProfileSet::default(), Vec::new());

        assert!(!runtime.is_active());
        assert!(runtime.normalized_boost().abs() < f32::EPSILON);
        assert!(runtime.absolute_boost().abs() < f32::EPSILON);
        assert!(runtime.boost_min().abs() < f32::EPSILON);
        assert!(runtime.boost_max().abs() < f32::EPSILON);
    }
}
