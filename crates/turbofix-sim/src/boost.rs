//! Boost Simulator
//!
//! The per-frame boost step. Steps run in a fixed order:
//!
//! 1. spin down toward zero when the turbo is off or the engine stopped,
//! 2. clamp the reported boost into the profile limits,
//! 3. derive the target from the closed-throttle and wide-open curves,
//! 4. smooth toward the target with the spool or unspool rate,
//! 5. clamp under the gear ceiling,
//! 6. anti-lag,
//! 7. falloff.

use crate::anti_lag::{AntiLagState, anti_lag_step};
use crate::falloff::apply_falloff;
use crate::gear::gear_ceiling;
use crate::math::{blend_factor, clamp, finite_or, lerp, map};
use crate::{BoostInput, TickOutput};
use rand::Rng;
use turbofix_profile::{TurboProfile, TurboSettings};

/// Normalized RPM where closed-throttle vacuum starts building.
pub const VACUUM_RPM_START: f32 = 0.2;

/// Per-vehicle boost simulation state.
///
/// One simulator exists per tracked vehicle. It holds no profile; the active
/// profile is passed to every [`tick`](Self::tick).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoostSimulator {
    anti_lag: AntiLagState,
}

impl BoostSimulator {
    /// Create a simulator with cleared anti-lag timing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anti-lag timing state.
    pub fn anti_lag(&self) -> &AntiLagState {
        &self.anti_lag
    }

    /// Advance one frame.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use turbofix_profile::TurboProfile;
    /// use turbofix_sim::prelude::*;
    ///
    /// let profile = TurboProfile::default_profile();
    /// let mut sim = BoostSimulator::new();
    /// let mut rng = StdRng::seed_from_u64(1);
    ///
    /// let input = BoostInput {
    ///     engine_running: false,
    ///     current_boost: 0.5,
    ///     delta_s: 1.0,
    ///     ..BoostInput::default()
    /// };
    /// let out = sim.tick(&profile, &input, &mut rng);
    /// assert!((out.boost - 0.015).abs() < 1e-4);
    /// ```
    pub fn tick<R: Rng>(&mut self, profile: &TurboProfile, input: &BoostInput, rng: &mut R) -> TickOutput {
        let turbo = &profile.turbo;
        let input = sanitize_input(input);
        let delta_s = input.delta_s;
        let reported = input.current_boost;

        if !input.turbo_installed || !input.engine_running {
            return TickOutput {
                boost: lerp(reported, 0.0, blend_factor(turbo.unspool_rate, delta_s)),
                ceiling: turbo.max_boost,
                pulse: None,
            };
        }

        let current = clamp(reported, turbo.min_boost, turbo.max_boost);
        let target = target_boost(turbo, input.rpm, input.throttle);
        let smoothed = spool_toward(turbo, current, target, delta_s);

        let ceiling = gear_ceiling(&profile.boost_by_gear, turbo.max_boost, input.gear);
        let mut boost = clamp(smoothed, turbo.min_boost, ceiling);
        let mut pulse = None;

        if profile.anti_lag.enable {
            let outcome = anti_lag_step(&mut self.anti_lag, profile, &input, current, boost, ceiling, rng);
            boost = outcome.boost;
            pulse = outcome.pulse;
        }

        TickOutput {
            boost: apply_falloff(turbo, input.rpm, boost),
            ceiling,
            pulse,
        }
    }
}

/// Bounds telemetry to its documented ranges. Non-finite values become
/// neutral and negative frame deltas become zero.
fn sanitize_input(input: &BoostInput) -> BoostInput {
    BoostInput {
        rpm: clamp(finite_or(input.rpm, 0.0), 0.0, 1.0),
        throttle: clamp(finite_or(input.throttle, 0.0), -1.0, 1.0),
        throttle_pedal: clamp(finite_or(input.throttle_pedal, 0.0), -1.0, 1.0),
        current_boost: finite_or(input.current_boost, 0.0),
        delta_s: if input.delta_s > 0.0 {
            finite_or(input.delta_s, 0.0)
        } else {
            0.0
        },
        ..*input
    }
}

/// Vacuum at closed throttle: zero at 0.2 RPM, `min_boost` at full RPM.
#[inline]
pub fn closed_throttle_boost(turbo: &TurboSettings, rpm: f32) -> f32 {
    let vacuum = map(rpm, VACUUM_RPM_START, 1.0, 0.0, turbo.min_boost);
    clamp(vacuum, turbo.min_boost, 0.0)
}

/// Boost at wide-open throttle: zero at spool start, `max_boost` at spool end.
#[inline]
pub fn wide_open_boost(turbo: &TurboSettings, rpm: f32) -> f32 {
    let boost = map(rpm, turbo.rpm_spool_start, turbo.rpm_spool_end, 0.0, turbo.max_boost);
    clamp(boost, 0.0, turbo.max_boost)
}

/// Target boost for the throttle magnitude, between the closed and wide-open
/// curves.
#[inline]
pub fn target_boost(turbo: &TurboSettings, rpm: f32, throttle: f32) -> f32 {
    map(
        throttle.abs(),
        0.0,
        1.0,
        closed_throttle_boost(turbo, rpm),
        wide_open_boost(turbo, rpm),
    )
}

/// Moves `current` toward `target`, using the spool rate when rising and the
/// unspool rate otherwise.
#[inline]
pub fn spool_toward(turbo: &TurboSettings, current: f32, target: f32, delta_s: f32) -> f32 {
    let rate = if target > current {
        turbo.spool_rate
    } else {
        turbo.unspool_rate
    };
    lerp(current, target, blend_factor(rate, delta_s))
}
