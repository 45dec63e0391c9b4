//! Profile validation and per-field repair

use crate::{AntiLagSettings, DialSettings, MAX_GEAR, ProfileError, ProfileResult, TurboProfile, TurboSettings};

/// Lowest accepted spool/unspool rate.
pub const MIN_RATE: f32 = 0.01;
/// Highest accepted spool/unspool rate. A rate of exactly 1.0 would make the
/// blend instantaneous.
pub const MAX_RATE: f32 = 0.999_999;

pub fn validate_profile(profile: &TurboProfile) -> ProfileResult<()> {
    if profile.name.trim().is_empty() {
        return Err(ProfileError::InvalidProfile(
            "Profile name cannot be empty".to_string(),
        ));
    }

    if !profile.is_default() && profile.has_empty_identity() {
        return Err(ProfileError::InvalidProfile(format!(
            "Profile '{}' has neither models nor plates",
            profile.name
        )));
    }

    if profile.is_default() && !profile.has_empty_identity() {
        return Err(ProfileError::InvalidProfile(
            "The default profile cannot carry models or plates".to_string(),
        ));
    }

    Ok(())
}

/// Repairs out-of-range or non-finite fields in place.
///
/// Returns the dotted names of every field that was changed. Missing fields
/// never reach this point: deserialization already substituted defaults.
pub fn sanitize_profile(profile: &mut TurboProfile) -> Vec<&'static str> {
    let mut repaired = Vec::new();
    sanitize_turbo(&mut profile.turbo, &mut repaired);

    let max_boost = profile.turbo.max_boost;
    let before = profile.boost_by_gear.gears.len();
    profile
        .boost_by_gear
        .gears
        .retain(|gear, limit| (1..=MAX_GEAR).contains(gear) && limit.is_finite());
    if profile.boost_by_gear.gears.len() != before {
        repaired.push("boost_by_gear.gears");
    }
    let mut clamped_gear = false;
    for limit in profile.boost_by_gear.gears.values_mut() {
        let bounded = clamp(*limit, 0.0, max_boost);
        if bounded.to_bits() != limit.to_bits() {
            *limit = bounded;
            clamped_gear = true;
        }
    }
    if clamped_gear {
        repaired.push("boost_by_gear.gears");
    }

    sanitize_anti_lag(&mut profile.anti_lag, &mut repaired);
    sanitize_dial(&mut profile.dial, &mut repaired);
    repaired.dedup();
    repaired
}

fn sanitize_turbo(turbo: &mut TurboSettings, repaired: &mut Vec<&'static str>) {
    let defaults = TurboSettings::default();

    repair(&mut turbo.rpm_spool_start, 0.0, 1.0, defaults.rpm_spool_start, "turbo.rpm_spool_start", repaired);
    repair(&mut turbo.rpm_spool_end, 0.0, 1.0, defaults.rpm_spool_end, "turbo.rpm_spool_end", repaired);
    repair(&mut turbo.min_boost, f32::MIN, 0.0, defaults.min_boost, "turbo.min_boost", repaired);
    repair(&mut turbo.max_boost, 0.0, f32::MAX, defaults.max_boost, "turbo.max_boost", repaired);
    repair(&mut turbo.spool_rate, MIN_RATE, MAX_RATE, defaults.spool_rate, "turbo.spool_rate", repaired);
    repair(&mut turbo.unspool_rate, MIN_RATE, MAX_RATE, defaults.unspool_rate, "turbo.unspool_rate", repaired);
    repair(&mut turbo.falloff_rpm, 0.0, 1.0, defaults.falloff_rpm, "turbo.falloff_rpm", repaired);

    let max_boost = turbo.max_boost;
    repair(&mut turbo.falloff_boost, turbo.min_boost, max_boost, max_boost, "turbo.falloff_boost", repaired);
}

fn sanitize_anti_lag(anti_lag: &mut AntiLagSettings, repaired: &mut Vec<&'static str>) {
    let defaults = AntiLagSettings::default();

    repair(&mut anti_lag.min_rpm, 0.0, 1.0, defaults.min_rpm, "anti_lag.min_rpm", repaired);
    repair(&mut anti_lag.volume, 0.0, 2.0, defaults.volume, "anti_lag.volume", repaired);
    if anti_lag.sound_set.trim().is_empty() {
        anti_lag.sound_set = defaults.sound_set;
        repaired.push("anti_lag.sound_set");
    }
}

fn sanitize_dial(dial: &mut DialSettings, repaired: &mut Vec<&'static str>) {
    let defaults = DialSettings::default();

    repair(&mut dial.boost_offset, f32::MIN, f32::MAX, defaults.boost_offset, "dial.boost_offset", repaired);
    repair(&mut dial.boost_scale, f32::MIN, f32::MAX, defaults.boost_scale, "dial.boost_scale", repaired);
    repair(&mut dial.vacuum_offset, f32::MIN, f32::MAX, defaults.vacuum_offset, "dial.vacuum_offset", repaired);
    repair(&mut dial.vacuum_scale, f32::MIN, f32::MAX, defaults.vacuum_scale, "dial.vacuum_scale", repaired);
}

/// Replaces a non-finite value with `fallback`, then bounds it to `[lo, hi]`.
fn repair(
    value: &mut f32,
    lo: f32,
    hi: f32,
    fallback: f32,
    field: &'static str,
    repaired: &mut Vec<&'static str>,
) {
    let candidate = if value.is_finite() { *value } else { fallback };
    let bounded = clamp(candidate, lo, hi);
    if bounded.to_bits() != value.to_bits() {
        *value = bounded;
        repaired.push(field);
    }
}

/// Total clamp: never panics, even for inverted bounds.
fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    if value < lo {
        lo
    } else if hi < value {
        hi
    } else {
        value
    }
}
