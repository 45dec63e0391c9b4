//! Profile store contract and an in-memory implementation

use crate::{ModelHash, ProfileError, ProfileResult, TurboProfile, is_default_name};
use tracing::{debug, info};

/// Match key written alongside a saved profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveCriteria {
    /// Save tuning only; an existing record keeps its models and plates.
    Tuning,
    /// Apply to every vehicle of the model.
    Model(ModelHash),
    /// Apply to the model with one specific plate.
    Specific { model: ModelHash, plate: String },
}

/// Persistence collaborator for profiles.
///
/// The on-disk format belongs to the implementation. `load_all` returns records
/// in priority order; the reserved default may or may not be among them.
pub trait ProfileStore {
    fn load_all(&self) -> ProfileResult<Vec<TurboProfile>>;

    fn save(
        &mut self,
        profile: &TurboProfile,
        name: &str,
        criteria: &SaveCriteria,
    ) -> ProfileResult<()>;
}

/// Ordered store kept in memory. Saving an existing name updates it in place.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: Vec<TurboProfile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = TurboProfile>) -> Self {
        Self {
            profiles: profiles.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TurboProfile> {
        self.position(name).and_then(|index| self.profiles.get(index))
    }

    fn position(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.profiles
            .iter()
            .position(|profile| profile.name.trim().eq_ignore_ascii_case(wanted))
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load_all(&self) -> ProfileResult<Vec<TurboProfile>> {
        debug!(count = self.profiles.len(), "Loading profiles from memory");
        Ok(self.profiles.clone())
    }

    fn save(
        &mut self,
        profile: &TurboProfile,
        name: &str,
        criteria: &SaveCriteria,
    ) -> ProfileResult<()> {
        let record = prepare_record(profile, name, criteria, self.get(name))?;

        match self.position(name) {
            Some(index) => {
                if let Some(slot) = self.profiles.get_mut(index) {
                    *slot = record;
                }
            }
            None => self.profiles.push(record),
        }

        info!(profile = %name.trim(), ?criteria, "Saved profile");
        Ok(())
    }
}

/// Builds the record a store persists for `profile` saved as `name`.
///
/// Shared by store implementations so every backend applies the same identity
/// rules: the default only ever takes tuning, and `Tuning` saves keep the
/// identity of an existing record.
pub fn prepare_record(
    profile: &TurboProfile,
    name: &str,
    criteria: &SaveCriteria,
    existing: Option<&TurboProfile>,
) -> ProfileResult<TurboProfile> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProfileError::SaveFailed {
            profile: profile.name.clone(),
            reason: "name cannot be empty".to_string(),
        });
    }

    if is_default_name(name) && *criteria != SaveCriteria::Tuning {
        return Err(ProfileError::SaveFailed {
            profile: name.to_string(),
            reason: "the default profile cannot be bound to a vehicle".to_string(),
        });
    }

    let mut record = match (criteria, existing) {
        (SaveCriteria::Tuning, Some(existing)) => existing.clone(),
        _ => profile.clone(),
    };
    record.apply_tuning_from(profile);
    record.name = name.to_string();

    match criteria {
        SaveCriteria::Tuning => {
            if is_default_name(name) {
                record.models.clear();
                record.model_names.clear();
                record.plates.clear();
            }
        }
        SaveCriteria::Model(model) => {
            record.models = vec![*model];
            record.model_names.clear();
            record.plates.clear();
        }
        SaveCriteria::Specific { model, plate } => {
            record.models = vec![*model];
            record.model_names.clear();
            record.plates = vec![plate.trim().to_string()];
        }
    }

    Ok(record)
}
