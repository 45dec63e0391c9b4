//! Vehicle runtime behaviour against an in-memory host.

use turbofix_profile::{MemoryProfileStore, ModelHash, ProfileSet, TurboProfile, TurboSettings};
use turbofix_runtime::{
    Host, NO_SOUND, PatchError, RuntimeError, RuntimeSettings, SaveScope, SoundSet, TickSummary,
    TurboQuery, VehicleHandle, VehicleRuntime,
};
use turbofix_test_helpers::prelude::*;
use turbofix_test_helpers::{assert_approx_eq, assert_within};

const PLAYER: i32 = 1;

/// The four host collaborators, lent to the runtime once per call.
struct Rig {
    garage: MockGarage,
    effects: RecordingEffects,
    dash: MockDashboard,
    patch: ScriptedPatch,
}

impl Rig {
    fn new(garage: MockGarage) -> Self {
        Self {
            garage,
            effects: RecordingEffects::new(),
            dash: MockDashboard::new(),
            patch: ScriptedPatch::new(),
        }
    }

    fn tick(&mut self, runtime: &mut VehicleRuntime) -> TickSummary {
        let mut host = Host::new(
            &mut self.garage,
            &mut self.effects,
            &mut self.dash,
            &mut self.patch,
        );
        runtime.tick(&mut host)
    }
}

fn runtime_with(profiles: Vec<TurboProfile>, settings: RuntimeSettings) -> VehicleRuntime {
    VehicleRuntime::new(settings.with_seed(7), ProfileSet::new(profiles), sound_sets())
}

fn driving(vehicle: MockVehicle) -> Rig {
    let mut garage = MockGarage::new().with_vehicle(PLAYER, vehicle);
    garage.enter(PLAYER);
    Rig::new(garage)
}

#[test]
fn test_player_spools_with_resolved_profile() -> TestResult {
    let mut runtime = runtime_with(vec![adder_profile()], RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER).with_rpm(0.8).with_throttle(1.0));

    let summary = rig.tick(&mut runtime);

    let name = must_some(runtime.active_profile(), "active profile").name.clone();
    assert_eq!(name, "adder-street");
    let boost = must_some(summary.player_boost, "player boost");
    // 1.4 * (1 - 0.001^(1/60))
    assert_approx_eq!(boost, 0.152_25_f32, 1e-4);
    assert_approx_eq!(rig.garage.boost(PLAYER), boost, f32::EPSILON);
    assert!(summary.patch_engaged);
    Ok(())
}

#[test]
fn test_unknown_model_uses_default() {
    let mut runtime = runtime_with(vec![adder_profile()], RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new("sultan"));

    rig.tick(&mut runtime);

    assert!(runtime.active_profile().is_some_and(TurboProfile::is_default));
}

#[test]
fn test_passenger_is_not_simulated() {
    let mut runtime = runtime_with(vec![adder_profile()], RuntimeSettings::new());
    let mut garage = MockGarage::new().with_vehicle(PLAYER, MockVehicle::new(ADDER));
    garage.enter_as_passenger(PLAYER);
    let mut rig = Rig::new(garage);

    let summary = rig.tick(&mut runtime);

    assert_eq!(summary.player_boost, None);
    assert!(!summary.patch_engaged);
    assert!(runtime.active_profile().is_none());
    assert_eq!(rig.garage.vehicle(PLAYER).map(|v| v.boost_writes), Some(0));
    assert!(!runtime.is_active());
}

#[test]
fn test_vehicle_change_re_resolves() {
    let mut runtime = runtime_with(vec![adder_profile()], RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER));
    rig.garage.spawn(2, MockVehicle::new("sultan"));

    rig.tick(&mut runtime);
    assert!(runtime.active_profile().is_some_and(|p| p.name == "adder-street"));

    rig.garage.enter(2);
    rig.tick(&mut runtime);
    assert!(runtime.active_profile().is_some_and(TurboProfile::is_default));
    assert_eq!(runtime.player().map(|p| p.vehicle()), Some(VehicleHandle(2)));
}

#[test]
fn test_player_instance_idles_when_leaving_and_keeps_timing() -> TestResult {
    let mut runtime = runtime_with(vec![anti_lag_profile(ADDER)], RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER).with_rpm(0.8));
    rig.garage.advance(16);
    rig.tick(&mut runtime);
    assert_eq!(rig.effects.pulses.len(), 1);

    rig.garage.leave();
    rig.garage.advance(16);
    let summary = rig.tick(&mut runtime);

    let player = must_some(runtime.player(), "idle player instance");
    assert!(player.active().is_none());
    assert_eq!(player.simulator().anti_lag().last_fx_ms, 16);
    assert_eq!(summary.player_boost, None);
    assert!(!summary.patch_engaged);
    assert!(!runtime.is_active());

    rig.garage.enter(PLAYER);
    rig.tick(&mut runtime);

    let player = must_some(runtime.player(), "player instance");
    assert_eq!(player.vehicle(), VehicleHandle(PLAYER));
    assert!(runtime.active_profile().is_some_and(|p| p.name == "adder-als"));
    Ok(())
}

#[test]
fn test_query_reads_live_boost_when_not_driving() {
    let mut runtime = runtime_with(vec![adder_profile()], RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER).with_rpm(0.8).with_throttle(1.0));
    rig.tick(&mut runtime);

    rig.garage.enter_as_passenger(PLAYER);
    if let Some(vehicle) = rig.garage.vehicle_mut(PLAYER) {
        vehicle.boost = 0.9;
    }
    let summary = rig.tick(&mut runtime);

    assert_eq!(summary.player_boost, None);
    assert_eq!(rig.garage.vehicle(PLAYER).map(|v| v.boost_writes), Some(1));
    assert_approx_eq!(runtime.absolute_boost(), 0.9_f32, f32::EPSILON);
}

#[test]
fn test_forced_turbo_installed_once() {
    let forced = TurboProfile::new("sultan-forced")
        .with_model(ModelHash::from_name("sultan"))
        .with_turbo(TurboSettings {
            force_turbo: true,
            ..TurboSettings::default()
        });
    let mut runtime = runtime_with(vec![forced], RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new("sultan").without_turbo());

    rig.tick(&mut runtime);
    rig.tick(&mut runtime);

    let vehicle = must_some(rig.garage.vehicle(PLAYER), "player vehicle");
    assert!(vehicle.turbo);
    assert_eq!(vehicle.turbo_installs, 1);
}

#[test]
fn test_engine_off_spins_down_and_updates_dial() {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut vehicle = MockVehicle::new(ADDER);
    vehicle.boost = 1.0;
    vehicle.engine_running = false;
    let mut rig = driving(vehicle);

    rig.tick(&mut runtime);

    // 1 - (1 - 0.03^(1/60))
    assert_approx_eq!(rig.garage.boost(PLAYER), 0.943_23_f32, 1e-4);
    assert_eq!(rig.dash.gauges.len(), 1);
}

#[test]
fn test_unavailable_dashboard_gets_nothing() {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER).with_rpm(0.6).with_throttle(1.0));
    rig.dash = MockDashboard::unavailable();

    rig.tick(&mut runtime);

    assert!(rig.dash.gauges.is_empty());
    assert!(rig.garage.boost(PLAYER) > 0.0);
}

#[test]
fn test_anti_lag_pulse_carries_sound_cue() -> TestResult {
    let mut runtime = runtime_with(vec![anti_lag_profile(ADDER)], RuntimeSettings::new());
    let mut vehicle = MockVehicle::new(ADDER).with_rpm(0.8);
    vehicle.boost = 0.5;
    let mut rig = driving(vehicle);
    rig.garage.advance(16);

    rig.tick(&mut runtime);

    assert_eq!(rig.effects.pulses.len(), 1);
    let pulse = must_some(rig.effects.pulses.first(), "pulse");
    assert!(pulse.loud);
    assert_approx_eq!(pulse.intensity, 1.25_f32, 1e-6);
    let cue = must_some(pulse.sound.as_ref(), "sound cue");
    assert_eq!(cue.sound_set, "Default");
    assert_approx_eq!(cue.volume, 0.25_f32, 1e-6);
    assert!(cue.pop.is_some_and(|pop| pop < 3));
    assert_within!(rig.garage.boost(PLAYER), 0.495_f32, 0.5125_f32);
    Ok(())
}

#[test]
fn test_silent_and_pop_less_sound_sets() {
    for (set, expect_cue) in [("NoSound", false), ("Rally", true)] {
        let mut profile = anti_lag_profile(ADDER);
        profile.anti_lag.sound_set = set.to_string();
        let mut runtime = runtime_with(vec![profile], RuntimeSettings::new());
        let mut rig = driving(MockVehicle::new(ADDER).with_rpm(0.8));
        rig.garage.advance(16);

        rig.tick(&mut runtime);

        let pulse = must_some(rig.effects.pulses.first(), "pulse");
        assert_eq!(pulse.sound.is_some(), expect_cue, "sound set {set}");
        if let Some(cue) = &pulse.sound {
            assert_eq!(cue.pop, None);
        }
    }
}

#[test]
fn test_no_sound_profile_stays_silent_without_registry_entry() {
    let mut profile = anti_lag_profile(ADDER);
    profile.anti_lag.sound_set = NO_SOUND.to_string();
    let sets = vec![SoundSet::new("Default", 3), SoundSet::new("Rally", 2)];
    let settings = RuntimeSettings::new().with_seed(7);
    let mut runtime = VehicleRuntime::new(settings, ProfileSet::new(vec![profile]), sets);
    let mut rig = driving(MockVehicle::new(ADDER).with_rpm(0.8));
    rig.garage.advance(16);

    rig.tick(&mut runtime);

    let pulse = must_some(rig.effects.pulses.first(), "pulse");
    assert!(pulse.loud);
    assert!(pulse.sound.is_none());
}

#[test]
fn test_npc_lifecycle() {
    let settings = RuntimeSettings::new().with_npcs(true);
    let mut runtime = runtime_with(vec![adder_profile()], settings);
    let garage = MockGarage::new()
        .with_vehicle(PLAYER, MockVehicle::new(ADDER))
        .with_vehicle(2, MockVehicle::new(ADDER).with_rpm(0.9).with_throttle(1.0))
        .with_vehicle(3, MockVehicle::new("sultan").without_turbo());
    let mut rig = Rig::new(garage);
    let mut wreck = MockVehicle::new("sultan");
    wreck.dead = true;
    rig.garage.spawn(4, wreck);
    rig.garage.enter(PLAYER);

    let summary = rig.tick(&mut runtime);

    assert_eq!(summary.npc_count, 1);
    assert_eq!(runtime.npcs().first().map(|n| n.vehicle()), Some(VehicleHandle(2)));
    assert!(rig.garage.boost(2) > 0.0);
    assert!(rig.dash.gauges.len() == 1, "only the player drives the dial");

    rig.garage.despawn(2);
    let summary = rig.tick(&mut runtime);
    assert_eq!(summary.npc_count, 0);
}

#[test]
fn test_npcs_alone_engage_patch() {
    let settings = RuntimeSettings::new().with_npcs(true);
    let mut runtime = runtime_with(Vec::new(), settings);
    let mut rig = Rig::new(MockGarage::new().with_vehicle(5, MockVehicle::new(ADDER)));

    let summary = rig.tick(&mut runtime);
    assert_eq!(summary.npc_count, 1);
    assert!(summary.patch_engaged);

    rig.garage.despawn(5);
    let summary = rig.tick(&mut runtime);
    assert!(!summary.patch_engaged);
    assert_eq!(rig.patch.restore_calls, 1);
}

#[test]
fn test_npcs_ignored_when_disabled() {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = Rig::new(MockGarage::new().with_vehicle(5, MockVehicle::new(ADDER)));

    let summary = rig.tick(&mut runtime);

    assert_eq!(summary.npc_count, 0);
    assert!(!summary.patch_engaged);
    assert_eq!(rig.garage.vehicle(5).map(|v| v.boost_writes), Some(0));
}

#[test]
fn test_failed_self_test_disables_patch() {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER));
    rig.patch = ScriptedPatch::missing();

    let probed = runtime.probe_patch(&mut rig.patch);
    let summary = rig.tick(&mut runtime);

    assert_eq!(probed, Err(RuntimeError::Patch(PatchError::TestFailed)));
    assert!(runtime.patch_error());
    assert!(!summary.patch_engaged);
    assert_eq!(rig.patch.apply_calls, 0);
    assert!(summary.player_boost.is_some());
}

#[test]
fn test_probe_engages_then_tick_releases() -> TestResult {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = Rig::new(MockGarage::new());

    runtime.probe_patch(&mut rig.patch)?;
    assert!(rig.patch.applied);

    rig.tick(&mut runtime);
    assert!(!rig.patch.applied);
    Ok(())
}

#[test]
fn test_failed_apply_latches_for_session() {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER));
    rig.patch = ScriptedPatch::with_apply_failure();

    rig.tick(&mut runtime);
    rig.tick(&mut runtime);

    assert!(runtime.patch_error());
    assert_eq!(rig.patch.apply_calls, 1);
}

#[test]
fn test_set_enabled_releases_immediately() -> TestResult {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER));
    rig.tick(&mut runtime);
    assert!(rig.patch.applied);
    assert!(runtime.is_active());

    runtime.set_enabled(false, &mut rig.patch)?;

    assert!(!rig.patch.applied);
    assert!(!runtime.is_active());
    Ok(())
}

#[test]
fn test_shutdown_restores_patch() -> TestResult {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER));
    rig.tick(&mut runtime);

    assert!(runtime.shutdown(&mut rig.patch)?);
    assert!(!rig.patch.applied);
    Ok(())
}

#[test]
fn test_shutdown_reports_restore_failure() {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER));
    rig.patch = ScriptedPatch::with_restore_failure();
    rig.tick(&mut runtime);

    let result = runtime.shutdown(&mut rig.patch);

    assert_eq!(result, Err(RuntimeError::Patch(PatchError::RestoreFailed)));
}

#[test]
fn test_reload_re_resolves_active_profile() -> TestResult {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER));
    rig.tick(&mut runtime);
    assert!(runtime.active_profile().is_some_and(TurboProfile::is_default));
    let generation = runtime.profiles().generation();

    let store = MemoryProfileStore::with_profiles([adder_profile()]);
    runtime.reload_profiles(&store, &mut rig.garage)?;

    assert!(runtime.active_profile().is_some_and(|p| p.name == "adder-street"));
    assert_eq!(runtime.profiles().generation(), generation.wrapping_add(1));
    Ok(())
}

#[test]
fn test_failed_reload_keeps_profiles() {
    let mut runtime = runtime_with(vec![adder_profile()], RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER));
    rig.tick(&mut runtime);

    let result = runtime.reload_profiles(&FailingStore, &mut rig.garage);

    assert!(matches!(result, Err(RuntimeError::Profile(_))));
    assert!(runtime.active_profile().is_some_and(|p| p.name == "adder-street"));
}

#[test]
fn test_save_specific_binds_plate() -> TestResult {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER).with_plate(ADDER_PLATE));
    rig.tick(&mut runtime);
    if let Some(profile) = runtime.active_profile_mut() {
        profile.turbo.max_boost = 1.2;
    }
    let mut store = MemoryProfileStore::new();

    runtime.save_active(&mut store, &mut rig.garage, "my-adder", SaveScope::Specific)?;

    let saved = must_some(store.get("my-adder"), "saved record");
    assert_eq!(saved.models, vec![ModelHash::from_name(ADDER)]);
    assert_eq!(saved.plates, vec![ADDER_PLATE.to_string()]);
    let active = must_some(runtime.active_profile(), "active profile");
    assert_eq!(active.name, "my-adder");
    assert_approx_eq!(active.turbo.max_boost, 1.2_f32, f32::EPSILON);
    Ok(())
}

#[test]
fn test_save_without_active_profile_fails() {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = Rig::new(MockGarage::new());
    let mut store = MemoryProfileStore::new();

    let result = runtime.save_active(&mut store, &mut rig.garage, "x", SaveScope::Model);

    assert_eq!(result, Err(RuntimeError::NoActiveProfile));
    assert!(store.is_empty());
}

#[test]
fn test_default_cannot_be_bound_to_model() {
    let mut runtime = runtime_with(Vec::new(), RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER));
    rig.tick(&mut runtime);
    let mut store = MemoryProfileStore::new();

    let result = runtime.save_active(&mut store, &mut rig.garage, "default", SaveScope::Model);

    assert!(matches!(result, Err(RuntimeError::Profile(_))));
}

#[test]
fn test_apply_to_active_copies_tuning() -> TestResult {
    let mut runtime = runtime_with(vec![adder_profile()], RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new("sultan"));
    rig.tick(&mut runtime);

    runtime.apply_to_active("adder-street")?;

    let active = must_some(runtime.active_profile(), "active profile");
    assert!(active.is_default());
    assert!(active.models.is_empty());
    assert_approx_eq!(active.turbo.max_boost, 1.4_f32, f32::EPSILON);

    let missing = runtime.apply_to_active("nope");
    assert!(matches!(missing, Err(RuntimeError::Profile(_))));
    Ok(())
}

#[test]
fn test_query_reports_player_boost() -> TestResult {
    let mut runtime = runtime_with(vec![adder_profile()], RuntimeSettings::new());
    let mut rig = driving(MockVehicle::new(ADDER).with_rpm(0.8).with_throttle(1.0));
    for _ in 0..30 {
        rig.garage.advance(16);
        rig.tick(&mut runtime);
    }

    let boost = rig.garage.boost(PLAYER);
    assert!(runtime.is_active());
    assert_approx_eq!(runtime.absolute_boost(), boost, f32::EPSILON);
    assert_approx_eq!(runtime.boost_min(), -0.8_f32, f32::EPSILON);
    assert_approx_eq!(runtime.boost_max(), 1.4_f32, f32::EPSILON);
    let expected = (boost + 0.8) / 2.2 * 2.0 - 1.0;
    assert_approx_eq!(runtime.normalized_boost(), expected, 1e-5);
    Ok(())
}

#[test]
fn test_same_seed_same_trace() {
    let trace = || {
        let mut runtime = runtime_with(vec![anti_lag_profile(ADDER)], RuntimeSettings::new());
        let mut rig = driving(MockVehicle::new(ADDER).with_rpm(0.9).with_throttle(1.0));
        let mut out = Vec::new();
        for frame in 0..120 {
            if frame == 60 {
                if let Some(v) = rig.garage.vehicle_mut(PLAYER) {
                    v.set_throttle(0.0);
                }
            }
            rig.garage.advance(16);
            rig.tick(&mut runtime);
            out.push(rig.garage.boost(PLAYER).to_bits());
        }
        (out, rig.effects.pulses.len())
    };

    assert_eq!(trace(), trace());
}
