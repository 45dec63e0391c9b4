//! Runtime settings

use serde::{Deserialize, Serialize};

/// Global runtime switches, loaded by the host alongside the profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub main: MainSettings,
    pub npc: NpcSettings,
    pub debug: DebugSettings,
    /// Seed for pulse timing and boost jitter. Seeded from the OS when absent.
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainSettings {
    /// Engages the boost limiter patch while any vehicle is simulated.
    pub enable: bool,
}

impl Default for MainSettings {
    fn default() -> Self {
        Self { enable: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcSettings {
    /// Simulate turbo-equipped NPC vehicles.
    pub enable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Log per-tick NPC boost at debug level.
    pub npc_details: bool,
}

impl RuntimeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.main.enable = enabled;
        self
    }

    pub fn with_npcs(mut self, enabled: bool) -> Self {
        self.npc.enable = enabled;
        self
    }

    pub fn with_npc_details(mut self, enabled: bool) -> Self {
        self.debug.npc_details = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}
