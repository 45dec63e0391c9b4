//! Prelude for the simulation crate.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! # Example
//!
//! ```
//! use turbofix_profile::TurboProfile;
//! use turbofix_sim::prelude::*;
//!
//! let profile = TurboProfile::default_profile();
//! let signals = map_dial(0.0, &profile);
//! assert!(signals.boost.abs() < 1e-6);
//! ```

pub use crate::anti_lag::{AntiLagOutcome, AntiLagState, anti_lag_step, pulse_intensity};
pub use crate::boost::{BoostSimulator, target_boost};
pub use crate::dial::{DialSignals, map_dial};
pub use crate::falloff::apply_falloff;
pub use crate::gear::gear_ceiling;
pub use crate::math::{blend_factor, clamp, lerp, map};
pub use crate::{BoostInput, PulseRequest, TickOutput};
