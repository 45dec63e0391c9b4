//! Frame-driven orchestration of every simulated vehicle

use crate::error::{RuntimeError, RuntimeResult};
use crate::host::{BoostLimiterPatch, Host, VehicleHandle, VehicleTelemetry};
use crate::instance::{Role, VehicleInstance};
use crate::patch::PatchGuard;
use crate::settings::RuntimeSettings;
use crate::sound::{SoundSet, SoundSetRegistry};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};
use turbofix_profile::{ProfileError, ProfileSet, ProfileStore, SaveCriteria, TurboProfile};

/// Which vehicles a saved profile applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveScope {
    /// Tuning only; an existing record keeps its match key.
    Tuning,
    /// Every vehicle of the current model.
    Model,
    /// The current model with the current plate.
    Specific,
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummary {
    /// Boost written to the player's vehicle, if it was simulated.
    pub player_boost: Option<f32>,
    /// NPC instances alive after the frame.
    pub npc_count: usize,
    /// Whether the boost limiter patch is applied after the frame.
    pub patch_engaged: bool,
}

/// Owns the profile collection and every per-vehicle simulation.
///
/// The host calls [`VehicleRuntime::tick`] once per frame. Profile edits and
/// reloads happen between ticks.
#[derive(Debug)]
pub struct VehicleRuntime {
    settings: RuntimeSettings,
    profiles: ProfileSet,
    sounds: SoundSetRegistry,
    player_vehicle: Option<VehicleHandle>,
    player: Option<VehicleInstance>,
    player_boost: f32,
    npcs: Vec<VehicleInstance>,
    guard: PatchGuard,
    rng: StdRng,
}

impl VehicleRuntime {
    pub fn new(settings: RuntimeSettings, profiles: ProfileSet, sound_sets: Vec<SoundSet>) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            profiles = profiles.len(),
            enabled = settings.main.enable,
            npcs = settings.npc.enable,
            "Turbo runtime created"
        );

        Self {
            settings,
            profiles,
            sounds: SoundSetRegistry::new(sound_sets),
            player_vehicle: None,
            player: None,
            player_boost: 0.0,
            npcs: Vec::new(),
            guard: PatchGuard::new(),
            rng,
        }
    }

    /// Builds a runtime from a store's current contents.
    pub fn from_store(
        settings: RuntimeSettings,
        store: &dyn ProfileStore,
        sound_sets: Vec<SoundSet>,
    ) -> RuntimeResult<Self> {
        let profiles = ProfileSet::new(store.load_all()?);
        Ok(Self::new(settings, profiles, sound_sets))
    }

    /// Runs the patch self-test and, when it passes, sets the patch to the
    /// global enable switch.
    pub fn probe_patch(&mut self, patch: &mut dyn BoostLimiterPatch) -> RuntimeResult<()> {
        self.guard.probe(patch)?;
        self.guard.set_engaged(patch, self.settings.main.enable)?;
        Ok(())
    }

    pub fn tick(&mut self, host: &mut Host<'_>) -> TickSummary {
        let player_boost = self.tick_player(host);

        if self.settings.npc.enable {
            self.tick_npcs(host);
        } else if !self.npcs.is_empty() {
            debug!(count = self.npcs.len(), "NPC simulation disabled, dropping instances");
            self.npcs.clear();
        }

        self.update_patch(host.patch);

        TickSummary {
            player_boost,
            npc_count: self.npcs.len(),
            patch_engaged: host.patch.is_applied(),
        }
    }

    fn tick_player(&mut self, host: &mut Host<'_>) -> Option<f32> {
        let vehicle = host.telemetry.player_vehicle();
        if vehicle != self.player_vehicle {
            info!(from = ?self.player_vehicle, to = ?vehicle, "Player vehicle changed");
            self.player_vehicle = vehicle;
            self.player_boost = 0.0;
            match vehicle {
                Some(vehicle) => {
                    let instance = self
                        .player
                        .get_or_insert_with(|| VehicleInstance::new(vehicle, Role::Player));
                    instance.retarget(vehicle);
                    instance.resolve(&self.profiles, &self.sounds, &mut *host.telemetry);
                }
                None => {
                    if let Some(instance) = self.player.as_mut() {
                        instance.go_idle();
                    }
                }
            }
        }

        let vehicle = self.player_vehicle?;
        let instance = self.player.as_mut()?;
        if !host.telemetry.exists(vehicle) {
            return None;
        }
        self.player_boost = host.telemetry.boost(vehicle);
        if !host.telemetry.player_drives(vehicle) {
            return None;
        }
        let profile = self.profiles.get(instance.active()?)?;

        let boost = instance.tick(profile, &self.sounds, host, &mut self.rng);
        self.player_boost = boost;
        Some(boost)
    }

    fn tick_npcs(&mut self, host: &mut Host<'_>) {
        let player_vehicle = self.player_vehicle;
        let telemetry = &*host.telemetry;
        let qualifying: Vec<VehicleHandle> = telemetry
            .live_vehicles()
            .into_iter()
            .filter(|&vehicle| {
                Some(vehicle) != player_vehicle
                    && telemetry.exists(vehicle)
                    && !telemetry.is_dead(vehicle)
                    && telemetry.is_turbo_installed(vehicle)
            })
            .collect();

        self.npcs.retain(|instance| {
            let keep = qualifying.contains(&instance.vehicle());
            if !keep {
                debug!(vehicle = ?instance.vehicle(), "Dropping NPC instance");
            }
            keep
        });

        for vehicle in qualifying {
            if self.npcs.iter().any(|instance| instance.vehicle() == vehicle) {
                continue;
            }
            let mut instance = VehicleInstance::new(vehicle, Role::Npc);
            instance.resolve(&self.profiles, &self.sounds, &mut *host.telemetry);
            debug!(vehicle = ?vehicle, "Created NPC instance");
            self.npcs.push(instance);
        }

        for instance in &mut self.npcs {
            let Some(profile) = instance.active().and_then(|handle| self.profiles.get(handle)) else {
                continue;
            };
            let boost = instance.tick(profile, &self.sounds, host, &mut self.rng);
            if self.settings.debug.npc_details {
                debug!(vehicle = ?instance.vehicle(), profile = %profile.name, boost, "NPC boost");
            }
        }
    }

    /// The patch is engaged while enabled and anything is simulated.
    fn patch_wanted(&self) -> bool {
        let player_active = self.player.as_ref().is_some_and(|p| p.active().is_some());
        self.settings.main.enable && (player_active || !self.npcs.is_empty())
    }

    fn update_patch(&mut self, patch: &mut dyn BoostLimiterPatch) {
        let wanted = self.patch_wanted();
        // Failures are latched and logged by the guard.
        if let Err(e) = self.guard.set_engaged(patch, wanted) {
            debug!(error = %e, wanted, "Boost limiter patch not updated");
        }
    }

    /// Reloads every profile from `store` and re-resolves all instances.
    ///
    /// On a load failure the current collection stays in place.
    pub fn reload_profiles(
        &mut self,
        store: &dyn ProfileStore,
        telemetry: &mut dyn VehicleTelemetry,
    ) -> RuntimeResult<()> {
        let loaded = store.load_all()?;
        self.profiles.replace(loaded);

        if let (Some(player), Some(_)) = (self.player.as_mut(), self.player_vehicle) {
            player.resolve(&self.profiles, &self.sounds, &mut *telemetry);
        }
        for npc in &mut self.npcs {
            npc.resolve(&self.profiles, &self.sounds, &mut *telemetry);
        }
        Ok(())
    }

    /// Persists the active profile under `name`, then reloads.
    pub fn save_active(
        &mut self,
        store: &mut dyn ProfileStore,
        telemetry: &mut dyn VehicleTelemetry,
        name: &str,
        scope: SaveScope,
    ) -> RuntimeResult<()> {
        let profile = self.active_profile().ok_or(RuntimeError::NoActiveProfile)?;
        let vehicle = self.player_vehicle.ok_or(RuntimeError::NoActiveProfile)?;

        let criteria = match scope {
            SaveScope::Tuning => SaveCriteria::Tuning,
            SaveScope::Model => SaveCriteria::Model(telemetry.model(vehicle)),
            SaveScope::Specific => SaveCriteria::Specific {
                model: telemetry.model(vehicle),
                plate: telemetry.plate(vehicle),
            },
        };

        store.save(profile, name, &criteria)?;
        info!(profile = %name, ?scope, "Saved turbo profile");

        self.reload_profiles(&*store, telemetry)
    }

    /// Copies the tuning of the profile named `source` onto the active profile.
    pub fn apply_to_active(&mut self, source: &str) -> RuntimeResult<()> {
        let handle = self
            .player
            .as_ref()
            .and_then(VehicleInstance::active)
            .ok_or(RuntimeError::NoActiveProfile)?;
        let source_profile = self
            .profiles
            .find_by_name(source)
            .and_then(|found| self.profiles.get(found))
            .cloned()
            .ok_or_else(|| ProfileError::NotFound(source.to_string()))?;

        let target = self.profiles.get_mut(handle).ok_or(RuntimeError::NoActiveProfile)?;
        target.apply_tuning_from(&source_profile);
        info!(from = %source_profile.name, to = %target.name, "Applied profile tuning");

        self.refresh_sound_sets();
        Ok(())
    }

    pub fn active_profile(&self) -> Option<&TurboProfile> {
        let handle = self.player.as_ref()?.active()?;
        self.profiles.get(handle)
    }

    /// Mutable access for an editor. Call [`Self::refresh_sound_sets`] after
    /// changing the anti-lag sound set.
    pub fn active_profile_mut(&mut self) -> Option<&mut TurboProfile> {
        let handle = self.player.as_ref()?.active()?;
        self.profiles.get_mut(handle)
    }

    pub fn refresh_sound_sets(&mut self) {
        let instances = self.player.iter_mut().chain(self.npcs.iter_mut());
        for instance in instances {
            if let Some(profile) = instance.active().and_then(|handle| self.profiles.get(handle)) {
                instance.refresh_sound_set(profile, &self.sounds);
            }
        }
    }

    /// Toggles the global switch and re-evaluates the patch right away.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        patch: &mut dyn BoostLimiterPatch,
    ) -> RuntimeResult<()> {
        self.settings.main.enable = enabled;
        info!(enabled, "Turbo simulation toggled");

        let wanted = self.patch_wanted();
        self.guard.set_engaged(patch, wanted)?;
        Ok(())
    }

    /// Releases the patch. Returns whether the collaborator was toggled.
    pub fn shutdown(&mut self, patch: &mut dyn BoostLimiterPatch) -> RuntimeResult<bool> {
        let released = self.guard.set_engaged(patch, false);
        if let Err(e) = &released {
            warn!(error = %e, "Boost limiter patch not released on shutdown");
        }
        info!("Turbo runtime shut down");
        Ok(released?)
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    pub fn sound_sets(&self) -> &SoundSetRegistry {
        &self.sounds
    }

    pub fn player(&self) -> Option<&VehicleInstance> {
        self.player.as_ref()
    }

    pub fn npcs(&self) -> &[VehicleInstance] {
        &self.npcs
    }

    pub fn npc_count(&self) -> usize {
        self.npcs.len()
    }

    /// Boost of the player's vehicle: the value written this frame when it
    /// was simulated, otherwise the live reading.
    pub fn player_boost(&self) -> f32 {
        self.player_boost
    }

    pub fn patch_error(&self) -> bool {
        self.guard.has_error()
    }
}
