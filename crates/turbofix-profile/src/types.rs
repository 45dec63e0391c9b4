//! Profile type definitions

use crate::{DEFAULT_PROFILE_NAME, ModelHash, is_default_name};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named turbo tuning record and the vehicles it applies to.
///
/// `models` and `plates` together form the match key. A profile with an empty
/// plate list applies to every plate of its models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurboProfile {
    pub name: String,
    pub models: Vec<ModelHash>,
    /// Display names for `models`, informational only.
    pub model_names: Vec<String>,
    pub plates: Vec<String>,
    pub turbo: TurboSettings,
    pub boost_by_gear: BoostByGear,
    pub anti_lag: AntiLagSettings,
    pub dial: DialSettings,
}

impl TurboProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            models: Vec::new(),
            model_names: Vec::new(),
            plates: Vec::new(),
            turbo: TurboSettings::default(),
            boost_by_gear: BoostByGear::default(),
            anti_lag: AntiLagSettings::default(),
            dial: DialSettings::default(),
        }
    }

    /// The reserved fallback profile with built-in tuning.
    pub fn default_profile() -> Self {
        Self::new(DEFAULT_PROFILE_NAME)
    }

    pub fn is_default(&self) -> bool {
        is_default_name(&self.name)
    }

    pub fn with_model(mut self, model: ModelHash) -> Self {
        self.models.push(model);
        self
    }

    /// Adds a model by name, recording both its hash and the display name.
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.models.push(ModelHash::from_name(&name));
        self.model_names.push(name);
        self
    }

    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.plates.push(plate.into());
        self
    }

    pub fn with_turbo(mut self, turbo: TurboSettings) -> Self {
        self.turbo = turbo;
        self
    }

    pub fn with_boost_by_gear(mut self, boost_by_gear: BoostByGear) -> Self {
        self.boost_by_gear = boost_by_gear;
        self
    }

    pub fn with_anti_lag(mut self, anti_lag: AntiLagSettings) -> Self {
        self.anti_lag = anti_lag;
        self
    }

    pub fn with_dial(mut self, dial: DialSettings) -> Self {
        self.dial = dial;
        self
    }

    /// Copies every tuning section of `other` onto this profile.
    ///
    /// Identity (`name`, `models`, `model_names`, `plates`) is left untouched.
    pub fn apply_tuning_from(&mut self, other: &TurboProfile) {
        self.turbo = other.turbo.clone();
        self.boost_by_gear = other.boost_by_gear.clone();
        self.anti_lag = other.anti_lag.clone();
        self.dial = other.dial.clone();
    }

    /// Returns true if the match key carries neither models nor plates.
    pub fn has_empty_identity(&self) -> bool {
        self.models.is_empty() && self.plates.is_empty()
    }
}

/// An unnamed profile with built-in tuning. Records missing a name fail validation
/// rather than silently becoming the reserved default.
impl Default for TurboProfile {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurboSettings {
    /// Install the turbo modification when resolved onto a vehicle without one.
    pub force_turbo: bool,
    /// Normalized RPM where boost starts building.
    pub rpm_spool_start: f32,
    /// Normalized RPM where full boost is available.
    pub rpm_spool_end: f32,
    /// Vacuum limit, at most zero.
    pub min_boost: f32,
    /// Boost limit, at least zero.
    pub max_boost: f32,
    /// Fraction of the gap to a higher target closed per second.
    pub spool_rate: f32,
    /// Fraction of the gap to a lower target closed per second.
    pub unspool_rate: f32,
    /// RPM where boost starts tapering off. Inactive unless above `rpm_spool_end`.
    pub falloff_rpm: f32,
    /// Boost ceiling at the rev limit when falloff is active.
    pub falloff_boost: f32,
}

impl Default for TurboSettings {
    fn default() -> Self {
        Self {
            force_turbo: false,
            rpm_spool_start: 0.2,
            rpm_spool_end: 0.5,
            min_boost: -0.8,
            max_boost: 1.0,
            spool_rate: 0.999,
            unspool_rate: 0.97,
            falloff_rpm: 0.0,
            falloff_boost: 1.0,
        }
    }
}

impl TurboSettings {
    pub fn falloff_active(&self) -> bool {
        self.falloff_rpm > self.rpm_spool_end
    }
}

/// Per-gear boost ceilings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostByGear {
    pub enable: bool,
    pub gears: BTreeMap<u8, f32>,
}

impl BoostByGear {
    /// Builds an enabled table from `(gear, ceiling)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u8, f32)>) -> Self {
        Self {
            enable: true,
            gears: pairs.into_iter().collect(),
        }
    }

    /// True when the table takes part in limiting.
    pub fn is_active(&self) -> bool {
        self.enable && !self.gears.is_empty()
    }

    /// Highest configured gear and its ceiling.
    pub fn top_gear(&self) -> Option<(u8, f32)> {
        self.gears.iter().next_back().map(|(gear, limit)| (*gear, *limit))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntiLagSettings {
    pub enable: bool,
    /// Minimum normalized RPM where anti-lag engages.
    pub min_rpm: f32,
    /// Exhaust pops, bangs and flames.
    pub effects: bool,
    pub period_ms: u32,
    pub random_ms: u32,
    /// Keep firing loud pulses after the initial throttle lift.
    pub loud_off_throttle: bool,
    pub loud_off_throttle_interval_ms: u32,
    pub sound_set: String,
    pub volume: f32,
}

impl Default for AntiLagSettings {
    fn default() -> Self {
        Self {
            enable: false,
            min_rpm: 0.65,
            effects: true,
            period_ms: 50,
            random_ms: 150,
            loud_off_throttle: false,
            loud_off_throttle_interval_ms: 500,
            sound_set: "Default".to_string(),
            volume: 0.25,
        }
    }
}

/// Dashboard dial remapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialSettings {
    pub boost_offset: f32,
    pub boost_scale: f32,
    pub vacuum_offset: f32,
    pub vacuum_scale: f32,
    /// Drive vacuum on the boost dial for combined gauges. Vacuum offset is ignored.
    pub boost_includes_vacuum: bool,
}

impl Default for DialSettings {
    fn default() -> Self {
        Self {
            boost_offset: 0.0,
            boost_scale: 1.0,
            vacuum_offset: 0.0,
            vacuum_scale: 1.0,
            boost_includes_vacuum: false,
        }
    }
}
