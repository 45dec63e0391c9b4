//! Per-vehicle simulation instance

use crate::host::{EffectRequest, Host, SoundCue, VehicleHandle, VehicleTelemetry};
use crate::sound::{NO_SOUND, SoundSetRegistry};
use rand::Rng;
use tracing::debug;
use turbofix_profile::{ProfileHandle, ProfileSet, TurboProfile};
use turbofix_sim::{BoostInput, BoostSimulator, PulseRequest, map_dial};

/// Who drives the simulated vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Forwards dial signals and is gated on the player driving.
    Player,
    Npc,
}

/// Simulation state for one vehicle.
#[derive(Debug, Clone)]
pub struct VehicleInstance {
    vehicle: VehicleHandle,
    role: Role,
    active: Option<ProfileHandle>,
    sim: BoostSimulator,
    sound_set: usize,
}

impl VehicleInstance {
    pub fn new(vehicle: VehicleHandle, role: Role) -> Self {
        Self {
            vehicle,
            role,
            active: None,
            sim: BoostSimulator::new(),
            sound_set: 0,
        }
    }

    pub fn vehicle(&self) -> VehicleHandle {
        self.vehicle
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn active(&self) -> Option<ProfileHandle> {
        self.active
    }

    pub fn sound_set(&self) -> usize {
        self.sound_set
    }

    pub fn simulator(&self) -> &BoostSimulator {
        &self.sim
    }

    /// Points the instance at another vehicle and drops its profile until
    /// the next [`Self::resolve`]. Anti-lag timing carries over.
    pub fn retarget(&mut self, vehicle: VehicleHandle) {
        self.vehicle = vehicle;
        self.active = None;
    }

    /// Parks the instance without a profile.
    pub fn go_idle(&mut self) {
        self.active = None;
    }

    /// Picks the profile for the vehicle's identity.
    ///
    /// A player instance gets no profile unless the player drives the vehicle.
    /// Installs the turbo when the resolved profile forces it.
    pub fn resolve(
        &mut self,
        profiles: &ProfileSet,
        sounds: &SoundSetRegistry,
        telemetry: &mut dyn VehicleTelemetry,
    ) {
        let vehicle = self.vehicle;
        if self.role == Role::Player
            && !(telemetry.exists(vehicle) && telemetry.player_drives(vehicle))
        {
            self.active = None;
            return;
        }

        let model = telemetry.model(vehicle);
        let plate = telemetry.plate(vehicle);
        let handle = profiles.resolve(model, &plate);
        self.active = Some(handle);

        let Some(profile) = profiles.get(handle) else {
            return;
        };

        if profile.turbo.force_turbo && !telemetry.is_turbo_installed(vehicle) {
            debug!(vehicle = ?vehicle, profile = %profile.name, "Installing forced turbo");
            telemetry.install_turbo(vehicle);
        }

        self.sound_set = sounds.index_of(&profile.anti_lag.sound_set);
        debug!(
            vehicle = ?vehicle,
            role = ?self.role,
            model = %model,
            profile = %profile.name,
            "Resolved turbo profile"
        );
    }

    pub fn refresh_sound_set(&mut self, profile: &TurboProfile, sounds: &SoundSetRegistry) {
        self.sound_set = sounds.index_of(&profile.anti_lag.sound_set);
    }

    /// Runs one frame against live telemetry and writes the boost back.
    pub fn tick<R: Rng>(
        &mut self,
        profile: &TurboProfile,
        sounds: &SoundSetRegistry,
        host: &mut Host<'_>,
        rng: &mut R,
    ) -> f32 {
        let input = read_input(&*host.telemetry, self.vehicle);
        let out = self.sim.tick(profile, &input, rng);

        if let Some(pulse) = out.pulse {
            let request = self.effect_request(pulse, profile, sounds, rng);
            host.effects.play_pulse(&request);
        }

        if self.role == Role::Player && host.dashboard.is_available() {
            host.dashboard.set_gauges(map_dial(out.boost, profile));
        }

        host.telemetry.set_boost(self.vehicle, out.boost);
        out.boost
    }

    fn effect_request<R: Rng>(
        &self,
        pulse: PulseRequest,
        profile: &TurboProfile,
        sounds: &SoundSetRegistry,
        rng: &mut R,
    ) -> EffectRequest {
        // A NoSound profile stays silent even when the registry lacks that set.
        let silent = profile.anti_lag.sound_set == NO_SOUND;
        let sound = sounds
            .get(self.sound_set)
            .filter(|set| !silent && !set.is_silent())
            .map(|set| SoundCue {
                sound_set: set.name.clone(),
                volume: profile.anti_lag.volume,
                pop: (pulse.loud && set.effect_count > 0)
                    .then(|| rng.random_range(0..set.effect_count)),
            });

        EffectRequest {
            vehicle: self.vehicle,
            loud: pulse.loud,
            intensity: pulse.intensity,
            sound,
        }
    }
}

fn read_input(telemetry: &dyn VehicleTelemetry, vehicle: VehicleHandle) -> BoostInput {
    BoostInput {
        rpm: telemetry.rpm(vehicle),
        throttle: telemetry.throttle(vehicle),
        throttle_pedal: telemetry.throttle_pedal(vehicle),
        gear: telemetry.gear(vehicle),
        current_boost: telemetry.boost(vehicle),
        turbo_installed: telemetry.is_turbo_installed(vehicle),
        engine_running: telemetry.is_engine_running(vehicle),
        delta_s: telemetry.frame_delta_seconds(),
        now_ms: telemetry.game_time_ms(),
    }
}
