//! Ready-made profiles and sound sets.

use turbofix_profile::{AntiLagSettings, ModelHash, TurboProfile, TurboSettings};
use turbofix_runtime::{NO_SOUND, SoundSet};

pub const ADDER: &str = "adder";
pub const ADDER_PLATE: &str = "46EEK572";

/// Model-wide profile for the adder with a higher boost ceiling.
pub fn adder_profile() -> TurboProfile {
    TurboProfile::new("adder-street")
        .with_model_name(ADDER)
        .with_turbo(TurboSettings {
            max_boost: 1.4,
            ..TurboSettings::default()
        })
}

/// Model-wide profile with anti-lag firing on every frame.
pub fn anti_lag_profile(model_name: &str) -> TurboProfile {
    TurboProfile::new(format!("{model_name}-als"))
        .with_model(ModelHash::from_name(model_name))
        .with_anti_lag(AntiLagSettings {
            enable: true,
            min_rpm: 0.3,
            period_ms: 0,
            random_ms: 0,
            loud_off_throttle: true,
            loud_off_throttle_interval_ms: 0,
            ..AntiLagSettings::default()
        })
}

pub fn sound_sets() -> Vec<SoundSet> {
    vec![
        SoundSet::new("Default", 3),
        SoundSet::new("Rally", 0),
        SoundSet::new(NO_SOUND, 0),
    ]
}
