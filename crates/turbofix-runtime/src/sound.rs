//! Sound-set registry

use tracing::warn;

/// Name of the sound set that plays nothing.
pub const NO_SOUND: &str = "NoSound";

/// A named group of exhaust samples: one bass sample plus `effect_count` pops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundSet {
    pub name: String,
    pub effect_count: u32,
}

impl SoundSet {
    pub fn new(name: impl Into<String>, effect_count: u32) -> Self {
        Self {
            name: name.into(),
            effect_count,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.name == NO_SOUND
    }
}

#[derive(Debug, Clone)]
pub struct SoundSetRegistry {
    sets: Vec<SoundSet>,
}

impl SoundSetRegistry {
    /// Builds a registry. An empty list falls back to a silent set so that
    /// index 0 always exists.
    pub fn new(sets: Vec<SoundSet>) -> Self {
        if sets.is_empty() {
            return Self::default();
        }
        Self { sets }
    }

    /// Index of the set named `name`, or 0 when unknown.
    pub fn index_of(&self, name: &str) -> usize {
        match self.sets.iter().position(|set| set.name == name) {
            Some(index) => index,
            None => {
                warn!(sound_set = %name, "Unknown sound set, using the first one");
                0
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&SoundSet> {
        self.sets.get(index)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl Default for SoundSetRegistry {
    fn default() -> Self {
        Self {
            sets: vec![SoundSet::new(NO_SOUND, 0)],
        }
    }
}
