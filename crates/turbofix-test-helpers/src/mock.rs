//! In-memory host collaborators.
//!
//! Tests own these directly and lend them to the runtime through
//! [`turbofix_runtime::Host`] for each call, so they can inspect and change
//! state between frames without interior mutability.

use std::collections::BTreeMap;
use turbofix_profile::{
    ModelHash, ProfileError, ProfileResult, ProfileStore, SaveCriteria, TurboProfile,
};
use turbofix_runtime::{
    BoostLimiterPatch, DashboardBridge, EffectPlayer, EffectRequest, VehicleHandle,
    VehicleTelemetry,
};
use turbofix_sim::DialSignals;

/// State of one simulated vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct MockVehicle {
    pub model: ModelHash,
    pub plate: String,
    pub rpm: f32,
    pub throttle: f32,
    pub throttle_pedal: f32,
    pub gear: i32,
    pub boost: f32,
    pub turbo: bool,
    pub engine_running: bool,
    pub dead: bool,
    pub boost_writes: usize,
    pub turbo_installs: usize,
}

impl MockVehicle {
    /// An idling, turbo-equipped vehicle of the named model.
    pub fn new(model_name: &str) -> Self {
        Self {
            model: ModelHash::from_name(model_name),
            plate: "46EEK572".to_string(),
            rpm: 0.2,
            throttle: 0.0,
            throttle_pedal: 0.0,
            gear: 1,
            boost: 0.0,
            turbo: true,
            engine_running: true,
            dead: false,
            boost_writes: 0,
            turbo_installs: 0,
        }
    }

    pub fn with_plate(mut self, plate: &str) -> Self {
        self.plate = plate.to_string();
        self
    }

    pub fn with_rpm(mut self, rpm: f32) -> Self {
        self.rpm = rpm;
        self
    }

    /// Sets both the effective throttle and the pedal.
    pub fn with_throttle(mut self, throttle: f32) -> Self {
        self.throttle = throttle;
        self.throttle_pedal = throttle;
        self
    }

    pub fn with_gear(mut self, gear: i32) -> Self {
        self.gear = gear;
        self
    }

    pub fn without_turbo(mut self) -> Self {
        self.turbo = false;
        self
    }

    pub fn set_throttle(&mut self, throttle: f32) {
        self.throttle = throttle;
        self.throttle_pedal = throttle;
    }
}

/// A world of vehicles plus the player's seat and the game clock.
#[derive(Debug, Clone)]
pub struct MockGarage {
    pub vehicles: BTreeMap<VehicleHandle, MockVehicle>,
    pub player: Option<VehicleHandle>,
    pub player_driving: bool,
    pub delta_s: f32,
    pub now_ms: u64,
}

impl MockGarage {
    pub fn new() -> Self {
        Self {
            vehicles: BTreeMap::new(),
            player: None,
            player_driving: false,
            delta_s: 1.0 / 60.0,
            now_ms: 0,
        }
    }

    pub fn with_vehicle(mut self, id: i32, vehicle: MockVehicle) -> Self {
        self.spawn(id, vehicle);
        self
    }

    pub fn spawn(&mut self, id: i32, vehicle: MockVehicle) {
        self.vehicles.insert(VehicleHandle(id), vehicle);
    }

    pub fn despawn(&mut self, id: i32) -> Option<MockVehicle> {
        self.vehicles.remove(&VehicleHandle(id))
    }

    /// Puts the player in the driver seat.
    pub fn enter(&mut self, id: i32) {
        self.player = Some(VehicleHandle(id));
        self.player_driving = true;
    }

    pub fn enter_as_passenger(&mut self, id: i32) {
        self.player = Some(VehicleHandle(id));
        self.player_driving = false;
    }

    pub fn leave(&mut self) {
        self.player = None;
        self.player_driving = false;
    }

    pub fn vehicle(&self, id: i32) -> Option<&MockVehicle> {
        self.vehicles.get(&VehicleHandle(id))
    }

    pub fn vehicle_mut(&mut self, id: i32) -> Option<&mut MockVehicle> {
        self.vehicles.get_mut(&VehicleHandle(id))
    }

    pub fn boost(&self, id: i32) -> f32 {
        self.vehicle(id).map_or(0.0, |v| v.boost)
    }

    /// Moves the clock forward by one frame of `ms` milliseconds.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        self.delta_s = ms as f32 / 1000.0;
    }
}

impl Default for MockGarage {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleTelemetry for MockGarage {
    fn player_vehicle(&self) -> Option<VehicleHandle> {
        self.player
    }

    fn player_drives(&self, vehicle: VehicleHandle) -> bool {
        self.player_driving && self.player == Some(vehicle)
    }

    fn live_vehicles(&self) -> Vec<VehicleHandle> {
        self.vehicles.keys().copied().collect()
    }

    fn exists(&self, vehicle: VehicleHandle) -> bool {
        self.vehicles.contains_key(&vehicle)
    }

    fn is_dead(&self, vehicle: VehicleHandle) -> bool {
        self.vehicles.get(&vehicle).is_some_and(|v| v.dead)
    }

    fn model(&self, vehicle: VehicleHandle) -> ModelHash {
        self.vehicles.get(&vehicle).map_or(ModelHash(0), |v| v.model)
    }

    fn plate(&self, vehicle: VehicleHandle) -> String {
        self.vehicles
            .get(&vehicle)
            .map(|v| v.plate.clone())
            .unwrap_or_default()
    }

    fn rpm(&self, vehicle: VehicleHandle) -> f32 {
        self.vehicles.get(&vehicle).map_or(0.0, |v| v.rpm)
    }

    fn throttle(&self, vehicle: VehicleHandle) -> f32 {
        self.vehicles.get(&vehicle).map_or(0.0, |v| v.throttle)
    }

    fn throttle_pedal(&self, vehicle: VehicleHandle) -> f32 {
        self.vehicles.get(&vehicle).map_or(0.0, |v| v.throttle_pedal)
    }

    fn gear(&self, vehicle: VehicleHandle) -> i32 {
        self.vehicles.get(&vehicle).map_or(0, |v| v.gear)
    }

    fn boost(&self, vehicle: VehicleHandle) -> f32 {
        self.vehicles.get(&vehicle).map_or(0.0, |v| v.boost)
    }

    fn set_boost(&mut self, vehicle: VehicleHandle, boost: f32) {
        if let Some(v) = self.vehicles.get_mut(&vehicle) {
            v.boost = boost;
            v.boost_writes += 1;
        }
    }

    fn is_turbo_installed(&self, vehicle: VehicleHandle) -> bool {
        self.vehicles.get(&vehicle).is_some_and(|v| v.turbo)
    }

    fn install_turbo(&mut self, vehicle: VehicleHandle) {
        if let Some(v) = self.vehicles.get_mut(&vehicle) {
            v.turbo = true;
            v.turbo_installs += 1;
        }
    }

    fn is_engine_running(&self, vehicle: VehicleHandle) -> bool {
        self.vehicles.get(&vehicle).is_some_and(|v| v.engine_running)
    }

    fn frame_delta_seconds(&self) -> f32 {
        self.delta_s
    }

    fn game_time_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Records every pulse request.
#[derive(Debug, Clone, Default)]
pub struct RecordingEffects {
    pub pulses: Vec<EffectRequest>,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loud_count(&self) -> usize {
        self.pulses.iter().filter(|p| p.loud).count()
    }

    pub fn for_vehicle(&self, id: i32) -> impl Iterator<Item = &EffectRequest> {
        self.pulses.iter().filter(move |p| p.vehicle == VehicleHandle(id))
    }
}

impl EffectPlayer for RecordingEffects {
    fn play_pulse(&mut self, request: &EffectRequest) {
        self.pulses.push(request.clone());
    }
}

/// Dashboard bridge that records gauge updates.
#[derive(Debug, Clone)]
pub struct MockDashboard {
    pub available: bool,
    pub gauges: Vec<DialSignals>,
}

impl MockDashboard {
    pub fn new() -> Self {
        Self {
            available: true,
            gauges: Vec::new(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn last(&self) -> Option<DialSignals> {
        self.gauges.last().copied()
    }
}

impl Default for MockDashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardBridge for MockDashboard {
    fn is_available(&self) -> bool {
        self.available
    }

    fn set_gauges(&mut self, signals: DialSignals) {
        self.gauges.push(signals);
    }
}

/// Boost-limiter patch with scriptable failures.
#[derive(Debug, Clone)]
pub struct ScriptedPatch {
    pub applied: bool,
    pub test_ok: bool,
    pub fail_apply: bool,
    pub fail_restore: bool,
    pub apply_calls: usize,
    pub restore_calls: usize,
}

impl ScriptedPatch {
    pub fn new() -> Self {
        Self {
            applied: false,
            test_ok: true,
            fail_apply: false,
            fail_restore: false,
            apply_calls: 0,
            restore_calls: 0,
        }
    }

    /// A patch whose self-test cannot locate the patch site.
    pub fn missing() -> Self {
        Self {
            test_ok: false,
            ..Self::new()
        }
    }

    pub fn with_apply_failure() -> Self {
        Self {
            fail_apply: true,
            ..Self::new()
        }
    }

    pub fn with_restore_failure() -> Self {
        Self {
            fail_restore: true,
            ..Self::new()
        }
    }
}

impl Default for ScriptedPatch {
    fn default() -> Self {
        Self::new()
    }
}

impl BoostLimiterPatch for ScriptedPatch {
    fn test(&mut self) -> bool {
        self.test_ok
    }

    fn apply(&mut self) -> bool {
        self.apply_calls += 1;
        if self.fail_apply {
            return false;
        }
        self.applied = true;
        true
    }

    fn restore(&mut self) -> bool {
        self.restore_calls += 1;
        if self.fail_restore {
            return false;
        }
        self.applied = false;
        true
    }

    fn is_applied(&self) -> bool {
        self.applied
    }
}

/// Profile store whose every operation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl ProfileStore for FailingStore {
    fn load_all(&self) -> ProfileResult<Vec<TurboProfile>> {
        Err(ProfileError::LoadFailed("mock load failure".to_string()))
    }

    fn save(
        &mut self,
        profile: &TurboProfile,
        _name: &str,
        _criteria: &SaveCriteria,
    ) -> ProfileResult<()> {
        Err(ProfileError::SaveFailed {
            profile: profile.name.clone(),
            reason: "mock save failure".to_string(),
        })
    }
}
