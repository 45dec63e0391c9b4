//! Profile resolution for a vehicle identity
//!
//! Resolution runs in three passes over an ordered profile list, first match
//! wins in each pass:
//!
//! 1. the model is listed and the plate is listed,
//! 2. the model is listed and the profile lists no plates,
//! 3. nothing matched: the default profile.

use crate::{ModelHash, TurboProfile, plates_match};

/// Returns the index of the best matching profile, or `None` when only the
/// default applies.
///
/// Profiles carrying the reserved default name never match by identity.
pub fn find_match(profiles: &[TurboProfile], model: ModelHash, plate: &str) -> Option<usize> {
    let candidates = || {
        profiles
            .iter()
            .enumerate()
            .filter(|(_, profile)| !profile.is_default() && profile.models.contains(&model))
    };

    let exact = candidates().find(|(_, profile)| {
        profile
            .plates
            .iter()
            .any(|listed| plates_match(listed, plate))
    });
    if let Some((index, _)) = exact {
        return Some(index);
    }

    candidates()
        .find(|(_, profile)| profile.plates.is_empty())
        .map(|(index, _)| index)
}

/// Selects the profile applying to `model` and `plate`, falling back to
/// `default`.
pub fn resolve<'a>(
    profiles: &'a [TurboProfile],
    default: &'a TurboProfile,
    model: ModelHash,
    plate: &str,
) -> &'a TurboProfile {
    find_match(profiles, model, plate)
        .and_then(|index| profiles.get(index))
        .unwrap_or(default)
}
