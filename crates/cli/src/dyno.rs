//! Headless host for dyno runs
//!
//! A single car strapped to a dyno: the player always drives it, RPM climbs
//! through the gears at wide-open throttle and falls back to idle once the
//! throttle is released.

use turbofix_profile::ModelHash;
use turbofix_runtime::{
    BoostLimiterPatch, DashboardBridge, EffectPlayer, EffectRequest, NO_SOUND, SoundSet,
    VehicleHandle, VehicleTelemetry,
};
use turbofix_sim::DialSignals;

pub const DYNO_VEHICLE: VehicleHandle = VehicleHandle(1);

const IDLE_RPM: f32 = 0.2;
const SHIFT_RPM: f32 = 0.65;
/// Normalized RPM gained per second in first gear.
const RPM_RISE_PER_S: f32 = 0.9;
const RPM_FALL_PER_S: f32 = 0.6;

/// How the pull is driven.
#[derive(Debug, Clone, Copy)]
pub struct DynoScript {
    pub frame_ms: u64,
    pub gears: u8,
    pub lift_at: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct DynoCar {
    pub model: ModelHash,
    pub plate: String,
    pub rpm: f32,
    pub throttle: f32,
    pub gear: u8,
    pub boost: f32,
    pub turbo: bool,
    pub now_ms: u64,
    pub delta_s: f32,
}

impl DynoCar {
    pub fn new(model: ModelHash, plate: &str) -> Self {
        Self {
            model,
            plate: plate.to_string(),
            rpm: IDLE_RPM,
            throttle: 0.0,
            gear: 1,
            boost: 0.0,
            turbo: true,
            now_ms: 0,
            delta_s: 0.0,
        }
    }

    /// Moves the car to `frame` of the script.
    pub fn advance(&mut self, script: &DynoScript, frame: u32) {
        self.now_ms = self.now_ms.saturating_add(script.frame_ms);
        self.delta_s = script.frame_ms as f32 / 1000.0;

        let lifted = script.lift_at.is_some_and(|lift| frame >= lift);
        if lifted {
            self.throttle = 0.0;
            self.rpm = (self.rpm - RPM_FALL_PER_S * self.delta_s).max(IDLE_RPM);
            return;
        }

        self.throttle = 1.0;
        self.rpm += RPM_RISE_PER_S / f32::from(self.gear) * self.delta_s;
        if self.rpm >= 1.0 {
            if self.gear < script.gears {
                self.gear = self.gear.saturating_add(1);
                self.rpm = SHIFT_RPM;
            } else {
                self.rpm = 1.0;
            }
        }
    }
}

impl VehicleTelemetry for DynoCar {
    fn player_vehicle(&self) -> Option<VehicleHandle> {
        Some(DYNO_VEHICLE)
    }

    fn player_drives(&self, vehicle: VehicleHandle) -> bool {
        vehicle == DYNO_VEHICLE
    }

    fn live_vehicles(&self) -> Vec<VehicleHandle> {
        vec![DYNO_VEHICLE]
    }

    fn exists(&self, vehicle: VehicleHandle) -> bool {
        vehicle == DYNO_VEHICLE
    }

    fn is_dead(&self, _vehicle: VehicleHandle) -> bool {
        false
    }

    fn model(&self, _vehicle: VehicleHandle) -> ModelHash {
        self.model
    }

    fn plate(&self, _vehicle: VehicleHandle) -> String {
        self.plate.clone()
    }

    fn rpm(&self, _vehicle: VehicleHandle) -> f32 {
        self.rpm
    }

    fn throttle(&self, _vehicle: VehicleHandle) -> f32 {
        self.throttle
    }

    fn throttle_pedal(&self, _vehicle: VehicleHandle) -> f32 {
        self.throttle
    }

    fn gear(&self, _vehicle: VehicleHandle) -> i32 {
        i32::from(self.gear)
    }

    fn boost(&self, _vehicle: VehicleHandle) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, _vehicle: VehicleHandle, boost: f32) {
        self.boost = boost;
    }

    fn is_turbo_installed(&self, _vehicle: VehicleHandle) -> bool {
        self.turbo
    }

    fn install_turbo(&mut self, _vehicle: VehicleHandle) {
        self.turbo = true;
    }

    fn is_engine_running(&self, _vehicle: VehicleHandle) -> bool {
        true
    }

    fn frame_delta_seconds(&self) -> f32 {
        self.delta_s
    }

    fn game_time_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Keeps the pulse of the current frame and running counts.
#[derive(Debug, Default)]
pub struct PulseLog {
    pub frame: Option<EffectRequest>,
    pub total: u32,
    pub loud: u32,
}

impl PulseLog {
    pub fn clear_frame(&mut self) {
        self.frame = None;
    }
}

impl EffectPlayer for PulseLog {
    fn play_pulse(&mut self, request: &EffectRequest) {
        self.total = self.total.saturating_add(1);
        if request.loud {
            self.loud = self.loud.saturating_add(1);
        }
        self.frame = Some(request.clone());
    }
}

#[derive(Debug, Default)]
pub struct GaugeRecorder {
    pub last: Option<DialSignals>,
}

impl DashboardBridge for GaugeRecorder {
    fn is_available(&self) -> bool {
        true
    }

    fn set_gauges(&mut self, signals: DialSignals) {
        self.last = Some(signals);
    }
}

/// Patch flag with nothing behind it.
#[derive(Debug, Default)]
pub struct DetachedPatch {
    applied: bool,
}

impl BoostLimiterPatch for DetachedPatch {
    fn test(&mut self) -> bool {
        true
    }

    fn apply(&mut self) -> bool {
        self.applied = true;
        true
    }

    fn restore(&mut self) -> bool {
        self.applied = false;
        true
    }

    fn is_applied(&self) -> bool {
        self.applied
    }
}

pub fn sound_sets() -> Vec<SoundSet> {
    vec![SoundSet::new("Default", 3), SoundSet::new(NO_SOUND, 0)]
}
