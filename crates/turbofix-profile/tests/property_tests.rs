//! Property-Based Tests for Profile Resolution
//!
//! Verifies resolution stays total, stable and plate-first across
//! generated profile collections.

use turbofix_profile::*;

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    const MODELS: [&str; 4] = ["adder", "elegy", "sultan", "banshee"];
    const PLATES: [&str; 4] = ["TURBO", "46EEK572", "BOOST", "ALS"];

    fn profile_strategy() -> impl Strategy<Value = TurboProfile> {
        (
            "[a-z]{1,8}",
            proptest::sample::subsequence(MODELS.to_vec(), 1..=2),
            proptest::sample::subsequence(PLATES.to_vec(), 0..=2),
            0.0f32..2.0f32,
        )
            .prop_map(|(name, models, plates, max_boost)| {
                let mut profile = TurboProfile::new(name);
                for model in models {
                    profile = profile.with_model_name(model);
                }
                for plate in plates {
                    profile = profile.with_plate(plate);
                }
                profile.turbo.max_boost = max_boost;
                profile
            })
    }

    proptest! {
        #[test]
        fn resolution_is_idempotent(
            profiles in proptest::collection::vec(profile_strategy(), 0..8),
            model in proptest::sample::select(MODELS.to_vec()),
            plate in proptest::sample::select(PLATES.to_vec()),
        ) {
            let set = ProfileSet::new(profiles);
            let model = ModelHash::from_name(model);

            let first = set.resolve(model, plate);
            let second = set.resolve(model, plate);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn unknown_identity_resolves_to_default(
            profiles in proptest::collection::vec(profile_strategy(), 0..8),
            plate in "[A-Z0-9]{1,8}",
        ) {
            let set = ProfileSet::new(profiles);
            let unknown = ModelHash::from_name("not-a-listed-model");

            prop_assert_eq!(set.resolve(unknown, &plate), set.default_handle());
        }

        #[test]
        fn exact_plate_wins_regardless_of_order(
            plate in proptest::sample::select(PLATES.to_vec()),
            relaxed_first in any::<bool>(),
        ) {
            let model = ModelHash::from_name("adder");
            let relaxed = TurboProfile::new("relaxed").with_model(model);
            let exact = TurboProfile::new("exact").with_model(model).with_plate(plate);
            let profiles = if relaxed_first {
                vec![relaxed, exact]
            } else {
                vec![exact, relaxed]
            };
            let set = ProfileSet::new(profiles);

            let handle = set.resolve(model, &plate.to_ascii_lowercase());
            let name = set.get(handle).map(|p| p.name.clone());
            prop_assert_eq!(name.as_deref(), Some("exact"));
        }

        #[test]
        fn sanitize_is_idempotent(
            spool_rate in proptest::num::f32::ANY,
            min_boost in -5.0f32..5.0f32,
            max_boost in -5.0f32..5.0f32,
            gear_limit in -5.0f32..5.0f32,
            gear in 0u8..15u8,
        ) {
            let mut profile = TurboProfile::new("p").with_model_name("adder");
            profile.turbo.spool_rate = spool_rate;
            profile.turbo.min_boost = min_boost;
            profile.turbo.max_boost = max_boost;
            profile.boost_by_gear = BoostByGear::from_pairs([(gear, gear_limit)]);

            sanitize_profile(&mut profile);
            let once = profile.clone();
            let repaired = sanitize_profile(&mut profile);

            prop_assert!(repaired.is_empty());
            prop_assert_eq!(profile, once);
        }

        #[test]
        fn sanitized_profile_is_in_range(
            min_boost in proptest::num::f32::ANY,
            max_boost in proptest::num::f32::ANY,
            unspool_rate in proptest::num::f32::ANY,
        ) {
            let mut profile = TurboProfile::new("p").with_model_name("adder");
            profile.turbo.min_boost = min_boost;
            profile.turbo.max_boost = max_boost;
            profile.turbo.unspool_rate = unspool_rate;

            sanitize_profile(&mut profile);

            prop_assert!(profile.turbo.min_boost <= 0.0);
            prop_assert!(profile.turbo.max_boost >= 0.0);
            prop_assert!(profile.turbo.unspool_rate > 0.0 && profile.turbo.unspool_rate < 1.0);
            prop_assert!(profile.turbo.falloff_boost >= profile.turbo.min_boost);
            prop_assert!(profile.turbo.falloff_boost <= profile.turbo.max_boost);
        }
    }
}

#[test]
fn test_reload_through_store_keeps_default_unique() -> Result<(), Box<dyn std::error::Error>> {
    let adder = ModelHash::from_name("adder");
    let mut store = MemoryProfileStore::with_profiles([
        TurboProfile::default_profile(),
        TurboProfile::new("adder").with_model(adder),
    ]);
    let mut set = ProfileSet::new(store.load_all()?);

    store.save(&TurboProfile::default_profile(), "default", &SaveCriteria::Tuning)?;
    set.replace(store.load_all()?);

    assert_eq!(set.iter().filter(|p| p.is_default()).count(), 1);
    assert_eq!(set.generation(), 1);
    Ok(())
}
