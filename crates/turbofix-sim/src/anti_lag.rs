//! Anti-Lag Controller
//!
//! Off-throttle at high RPM, anti-lag holds boost near its current value with
//! a slightly positive random multiplier and schedules exhaust pulses at
//! randomized intervals. Pulses are returned to the caller as
//! [`PulseRequest`]s; this module never plays anything itself.

use crate::math::{clamp, map};
use crate::{BoostInput, PulseRequest};
use rand::Rng;
use turbofix_profile::{TurboProfile, TurboSettings};

/// Pedal magnitude below which the throttle counts as closed.
pub const CLOSED_THROTTLE: f32 = 0.1;

/// Pedal drop rate, in full travel per second, that counts as a sharp lift.
/// A full lift within 200 ms exceeds it.
pub const SHARP_LIFT_RATE: f32 = 1000.0 / 200.0;

/// Lower bound of the boost retention multiplier.
pub const RETENTION_MIN: f32 = 0.990;
/// Upper bound of the boost retention multiplier.
pub const RETENTION_MAX: f32 = 1.025;

/// Pulse intensity for loud pulses, also the upper bound for quiet ones.
pub const LOUD_INTENSITY: f32 = 1.25;
/// Lower bound of quiet pulse intensity.
pub const QUIET_INTENSITY_MIN: f32 = 0.75;

/// Timing state for one vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AntiLagState {
    /// Game time of the last pulse, in milliseconds
    pub last_fx_ms: u64,
    /// Game time of the last loud pulse, in milliseconds
    pub last_loud_ms: u64,
    /// Throttle pedal observed on the previous call
    pub last_throttle: f32,
}

/// Result of one anti-lag evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntiLagOutcome {
    /// Boost to use for this tick
    pub boost: f32,
    /// Pulse due this tick, if any
    pub pulse: Option<PulseRequest>,
}

/// Evaluates anti-lag for one tick.
///
/// `current_boost` is the boost clamped into the profile limits before
/// smoothing, `new_boost` the smoothed and gear-limited value, and `ceiling`
/// the gear ceiling. When the throttle is open or RPM is at or below
/// `min_rpm`, `new_boost` is returned unchanged. The pedal is recorded for
/// lift detection either way.
pub fn anti_lag_step<R: Rng>(
    state: &mut AntiLagState,
    profile: &TurboProfile,
    input: &BoostInput,
    current_boost: f32,
    new_boost: f32,
    ceiling: f32,
    rng: &mut R,
) -> AntiLagOutcome {
    let settings = &profile.anti_lag;
    let mut outcome = AntiLagOutcome {
        boost: new_boost,
        pulse: None,
    };

    if input.throttle_pedal.abs() < CLOSED_THROTTLE && input.rpm > settings.min_rpm {
        if settings.effects {
            outcome.pulse = schedule_pulse(state, profile, input, rng);
        }

        let multiplier = rng.random_range(RETENTION_MIN..=RETENTION_MAX);
        outcome.boost = clamp(current_boost * multiplier, profile.turbo.min_boost, ceiling);
    }

    state.last_throttle = input.throttle_pedal;
    outcome
}

fn schedule_pulse<R: Rng>(
    state: &mut AntiLagState,
    profile: &TurboProfile,
    input: &BoostInput,
    rng: &mut R,
) -> Option<PulseRequest> {
    let settings = &profile.anti_lag;
    let due_at = state
        .last_fx_ms
        .saturating_add(u64::from(settings.period_ms))
        .saturating_add(jitter(rng, settings.random_ms));
    if input.now_ms <= due_at {
        return None;
    }

    let loud_at = state
        .last_loud_ms
        .saturating_add(u64::from(settings.loud_off_throttle_interval_ms))
        .saturating_add(jitter(rng, settings.random_ms));
    let sharp_lift = input.delta_s > 0.0
        && (state.last_throttle - input.throttle_pedal) / input.delta_s > SHARP_LIFT_RATE;
    let loud = sharp_lift || (settings.loud_off_throttle && input.now_ms > loud_at);

    if loud {
        state.last_loud_ms = input.now_ms;
    }
    state.last_fx_ms = input.now_ms;

    Some(PulseRequest {
        loud,
        intensity: pulse_intensity(&profile.turbo, input.rpm, loud),
    })
}

/// Effect size hint for a pulse.
///
/// Loud pulses are always [`LOUD_INTENSITY`]; quiet ones scale with RPM over
/// the spool range, bounded to `[0.75, 1.25]`.
pub fn pulse_intensity(turbo: &TurboSettings, rpm: f32, loud: bool) -> f32 {
    if loud {
        return LOUD_INTENSITY;
    }
    let scaled = map(
        rpm,
        turbo.rpm_spool_start,
        turbo.rpm_spool_end,
        QUIET_INTENSITY_MIN,
        LOUD_INTENSITY,
    );
    clamp(scaled, QUIET_INTENSITY_MIN, LOUD_INTENSITY)
}

/// Uniform delay in `[0, random_ms)`; zero when `random_ms` is zero.
fn jitter<R: Rng>(rng: &mut R, random_ms: u32) -> u64 {
    if random_ms == 0 {
        return 0;
    }
    u64::from(rng.random_range(0..random_ms))
}
