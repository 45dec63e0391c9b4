//! Ordered profile collection with a reserved default

use crate::{ModelHash, TurboProfile, find_match, is_default_name, sanitize_profile, validate_profile};
use tracing::{info, warn};

/// Generation-checked reference to a profile inside a [`ProfileSet`].
///
/// Handles are invalidated by [`ProfileSet::replace`]; lookups through a stale
/// handle return `None` instead of reaching a different profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileHandle {
    index: usize,
    generation: u64,
}

impl ProfileHandle {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct ProfileSet {
    profiles: Vec<TurboProfile>,
    default_index: usize,
    generation: u64,
}

impl ProfileSet {
    /// Builds a collection from loaded records.
    ///
    /// Records are sanitized and invalid ones are skipped. The first record
    /// named `default` becomes the default; later ones are dropped. When none
    /// is present a default with built-in tuning is inserted first.
    pub fn new(loaded: Vec<TurboProfile>) -> Self {
        let mut set = Self {
            profiles: Vec::new(),
            default_index: 0,
            generation: 0,
        };
        set.fill(loaded);
        set
    }

    /// Replaces the contents with a fresh load and invalidates every handle.
    pub fn replace(&mut self, loaded: Vec<TurboProfile>) {
        self.generation = self.generation.wrapping_add(1);
        self.fill(loaded);
    }

    fn fill(&mut self, loaded: Vec<TurboProfile>) {
        let mut profiles = Vec::with_capacity(loaded.len().saturating_add(1));
        let mut default_index = None;

        for mut profile in loaded {
            let repaired = sanitize_profile(&mut profile);
            if !repaired.is_empty() {
                warn!(profile = %profile.name, fields = ?repaired, "Repaired profile fields");
            }

            if profile.is_default() {
                if default_index.is_some() {
                    warn!(profile = %profile.name, "Dropping duplicate default profile");
                    continue;
                }
                // The reserved profile matches by fallback only.
                profile.models.clear();
                profile.model_names.clear();
                profile.plates.clear();
                default_index = Some(profiles.len());
            } else if let Err(e) = validate_profile(&profile) {
                warn!(profile = %profile.name, error = %e, "Skipping invalid profile");
                continue;
            }

            profiles.push(profile);
        }

        let default_index = match default_index {
            Some(index) => index,
            None => {
                profiles.insert(0, TurboProfile::default_profile());
                0
            }
        };

        info!(
            count = profiles.len(),
            generation = self.generation,
            "Loaded turbo profiles"
        );

        self.profiles = profiles;
        self.default_index = default_index;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TurboProfile> {
        self.profiles.iter()
    }

    pub fn default_handle(&self) -> ProfileHandle {
        self.handle(self.default_index)
    }

    pub fn default_profile(&self) -> Option<&TurboProfile> {
        self.profiles.get(self.default_index)
    }

    pub fn get(&self, handle: ProfileHandle) -> Option<&TurboProfile> {
        if handle.generation != self.generation {
            return None;
        }
        self.profiles.get(handle.index)
    }

    pub fn get_mut(&mut self, handle: ProfileHandle) -> Option<&mut TurboProfile> {
        if handle.generation != self.generation {
            return None;
        }
        self.profiles.get_mut(handle.index)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ProfileHandle> {
        if is_default_name(name) {
            return Some(self.default_handle());
        }
        let wanted = name.trim();
        self.profiles
            .iter()
            .position(|profile| profile.name.trim().eq_ignore_ascii_case(wanted))
            .map(|index| self.handle(index))
    }

    /// Resolves the profile applying to a vehicle identity. Never fails.
    pub fn resolve(&self, model: ModelHash, plate: &str) -> ProfileHandle {
        match find_match(&self.profiles, model, plate) {
            Some(index) => self.handle(index),
            None => self.default_handle(),
        }
    }

    fn handle(&self, index: usize) -> ProfileHandle {
        ProfileHandle {
            index,
            generation: self.generation,
        }
    }
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
