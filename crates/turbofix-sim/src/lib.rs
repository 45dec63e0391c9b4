//! Turbo Boost Simulation Core for TurboFix
//!
//! This crate turns engine telemetry and an active tuning profile into a boost
//! pressure value once per frame. It is host-agnostic: callers read telemetry,
//! call [`BoostSimulator::tick`], then write the result back and forward any
//! effect requests.
//!
//! # Overview
//!
//! - **Boost**: asymmetric spool/unspool smoothing toward an RPM and throttle
//!   derived target
//! - **Gear limiting**: per-gear boost ceilings
//! - **Anti-lag**: off-throttle boost retention with randomized exhaust pulses
//! - **Falloff**: boost taper near the rev limit
//! - **Dial**: remapping of boost onto dashboard gauge signals
//!
//! # Totality
//!
//! Every function returns a value for every input. Bounds read from profile
//! data go through [`math::clamp`], which never panics.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use turbofix_profile::TurboProfile;
//! use turbofix_sim::prelude::*;
//!
//! let profile = TurboProfile::default_profile();
//! let mut sim = BoostSimulator::new();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let input = BoostInput {
//!     rpm: 0.5,
//!     throttle: 1.0,
//!     throttle_pedal: 1.0,
//!     delta_s: 1.0 / 60.0,
//!     ..BoostInput::default()
//! };
//! let out = sim.tick(&profile, &input, &mut rng);
//! assert!(out.boost > 0.0 && out.boost < 1.0);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod anti_lag;
pub mod boost;
pub mod dial;
pub mod falloff;
pub mod gear;
pub mod math;
pub mod prelude;

pub use anti_lag::{AntiLagOutcome, AntiLagState, anti_lag_step, pulse_intensity};
pub use boost::{BoostSimulator, closed_throttle_boost, spool_toward, target_boost, wide_open_boost};
pub use dial::{DialSignals, map_dial};
pub use falloff::apply_falloff;
pub use gear::gear_ceiling;

/// Telemetry snapshot for one vehicle and one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostInput {
    /// Normalized engine RPM (0.0 to 1.0)
    pub rpm: f32,
    /// Effective throttle (-1.0 to 1.0); only its magnitude is used
    pub throttle: f32,
    /// Signed throttle pedal position, used for lift detection
    pub throttle_pedal: f32,
    /// Current gear; zero and negative values mean reverse or neutral
    pub gear: i32,
    /// Boost pressure the vehicle reports before this tick
    pub current_boost: f32,
    /// Whether the turbo modification is toggled on
    pub turbo_installed: bool,
    /// Whether the engine is running
    pub engine_running: bool,
    /// Frame duration in seconds
    pub delta_s: f32,
    /// Game clock in milliseconds
    pub now_ms: u64,
}

impl Default for BoostInput {
    fn default() -> Self {
        Self {
            rpm: 0.2,
            throttle: 0.0,
            throttle_pedal: 0.0,
            gear: 1,
            current_boost: 0.0,
            turbo_installed: true,
            engine_running: true,
            delta_s: 0.0,
            now_ms: 0,
        }
    }
}

/// An exhaust pulse the host should render and play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseRequest {
    /// Loud pulses follow a sharp throttle lift or the loud off-throttle timer
    pub loud: bool,
    /// Effect size hint, 0.75 to 1.25
    pub intensity: f32,
}

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Boost pressure to write back to the vehicle
    pub boost: f32,
    /// Active boost ceiling for this tick
    pub ceiling: f32,
    /// Exhaust pulse due this tick, if any
    pub pulse: Option<PulseRequest>,
}
