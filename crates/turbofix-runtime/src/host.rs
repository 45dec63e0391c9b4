//! Host collaborator contracts
//!
//! The runtime never touches game memory, audio or instruments directly. Each
//! frame it borrows the four collaborators below through a [`Host`].

use turbofix_profile::ModelHash;
use turbofix_sim::DialSignals;

/// Opaque vehicle handle issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleHandle(pub i32);

/// Read and write access to live vehicle state.
///
/// Implementations may be called for handles that no longer exist; `exists`
/// is checked first, and every other query should return a neutral value for
/// stale handles instead of failing.
pub trait VehicleTelemetry {
    /// Vehicle the player currently occupies, if any.
    fn player_vehicle(&self) -> Option<VehicleHandle>;

    /// Whether the player sits in the driver seat of `vehicle`.
    fn player_drives(&self, vehicle: VehicleHandle) -> bool;

    /// Every vehicle currently spawned in the world.
    fn live_vehicles(&self) -> Vec<VehicleHandle>;

    fn exists(&self, vehicle: VehicleHandle) -> bool;

    fn is_dead(&self, vehicle: VehicleHandle) -> bool;

    fn model(&self, vehicle: VehicleHandle) -> ModelHash;

    fn plate(&self, vehicle: VehicleHandle) -> String;

    /// Normalized engine RPM, 0.0 to 1.0.
    fn rpm(&self, vehicle: VehicleHandle) -> f32;

    /// Effective throttle, -1.0 to 1.0.
    fn throttle(&self, vehicle: VehicleHandle) -> f32;

    /// Signed throttle pedal position, -1.0 to 1.0.
    fn throttle_pedal(&self, vehicle: VehicleHandle) -> f32;

    fn gear(&self, vehicle: VehicleHandle) -> i32;

    fn boost(&self, vehicle: VehicleHandle) -> f32;

    fn set_boost(&mut self, vehicle: VehicleHandle, boost: f32);

    fn is_turbo_installed(&self, vehicle: VehicleHandle) -> bool;

    fn install_turbo(&mut self, vehicle: VehicleHandle);

    fn is_engine_running(&self, vehicle: VehicleHandle) -> bool;

    /// Duration of the current frame in seconds.
    fn frame_delta_seconds(&self) -> f32;

    /// Game clock in milliseconds.
    fn game_time_ms(&self) -> u64;
}

/// Sound selection for an exhaust pulse.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundCue {
    pub sound_set: String,
    pub volume: f32,
    /// Pop sample to play on top of the set's bass sample.
    pub pop: Option<u32>,
}

/// Exhaust pulse to render at a vehicle's exhausts.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRequest {
    pub vehicle: VehicleHandle,
    pub loud: bool,
    /// Particle size hint, 0.75 to 1.25
    pub intensity: f32,
    /// `None` when the profile selected the silent sound set.
    pub sound: Option<SoundCue>,
}

pub trait EffectPlayer {
    fn play_pulse(&mut self, request: &EffectRequest);
}

/// Dashboard instrument bridge; may be absent at runtime.
pub trait DashboardBridge {
    fn is_available(&self) -> bool;

    fn set_gauges(&mut self, signals: DialSignals);
}

/// Toggle for the engine's built-in boost limiter.
///
/// Every method reports success. `test` locates the patch site without
/// modifying anything.
pub trait BoostLimiterPatch {
    fn test(&mut self) -> bool;

    fn apply(&mut self) -> bool;

    fn restore(&mut self) -> bool;

    fn is_applied(&self) -> bool;
}

/// Collaborators borrowed for one runtime call.
pub struct Host<'a> {
    pub telemetry: &'a mut dyn VehicleTelemetry,
    pub effects: &'a mut dyn EffectPlayer,
    pub dashboard: &'a mut dyn DashboardBridge,
    pub patch: &'a mut dyn BoostLimiterPatch,
}

impl<'a> Host<'a> {
    pub fn new(
        telemetry: &'a mut dyn VehicleTelemetry,
        effects: &'a mut dyn EffectPlayer,
        dashboard: &'a mut dyn DashboardBridge,
        patch: &'a mut dyn BoostLimiterPatch,
    ) -> Self {
        Self {
            telemetry,
            effects,
            dashboard,
            patch,
        }
    }
}

impl std::fmt::Debug for Host<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("patch_applied", &self.patch.is_applied())
            .field("dashboard_available", &self.dashboard.is_available())
            .finish_non_exhaustive()
    }
}

/// Effect player that discards every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEffects;

impl EffectPlayer for NullEffects {
    fn play_pulse(&mut self, _request: &EffectRequest) {}
}

/// Dashboard bridge for hosts without an instrument plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDashboard;

impl DashboardBridge for NoDashboard {
    fn is_available(&self) -> bool {
        false
    }

    fn set_gauges(&mut self, _signals: DialSignals) {}
}
