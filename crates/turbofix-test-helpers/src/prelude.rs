//! Convenience re-exports for common test utilities.

pub use crate::must::{must, must_some, must_with};

#[cfg(feature = "fixtures")]
pub use crate::fixtures::{ADDER, ADDER_PLATE, adder_profile, anti_lag_profile, sound_sets};

#[cfg(feature = "mock")]
pub use crate::mock::{
    FailingStore, MockDashboard, MockGarage, MockVehicle, RecordingEffects, ScriptedPatch,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
