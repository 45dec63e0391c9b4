//! Vehicle turbo runtime for TurboFix
//!
//! Drives one [`turbofix_sim::BoostSimulator`] per vehicle from host telemetry:
//! the player's vehicle and, optionally, every turbo-equipped NPC vehicle. The
//! runtime resolves a tuning profile for each vehicle, forwards exhaust pulses
//! and dial signals to the host, and keeps the engine's boost limiter patched
//! while anything is simulated.
//!
//! The host supplies its collaborators through [`Host`] on every call; the
//! runtime holds no global state.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod host;
pub mod instance;
pub mod patch;
pub mod query;
pub mod runtime;
pub mod settings;
pub mod sound;

pub use error::{PatchError, RuntimeError, RuntimeResult};
pub use host::{
    BoostLimiterPatch, DashboardBridge, EffectPlayer, EffectRequest, Host, NoDashboard,
    NullEffects, SoundCue, VehicleHandle, VehicleTelemetry,
};
pub use instance::{Role, VehicleInstance};
pub use patch::PatchGuard;
pub use query::TurboQuery;
pub use runtime::{SaveScope, TickSummary, VehicleRuntime};
pub use settings::{DebugSettings, MainSettings, NpcSettings, RuntimeSettings};
pub use sound::{NO_SOUND, SoundSet, SoundSetRegistry};
