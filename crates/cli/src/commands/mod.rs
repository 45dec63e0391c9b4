//! Command implementations for turboctl

pub mod profile;
pub mod simulate;

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// JSON file holding an array of turbo profiles
    #[arg(short, long)]
    pub profiles: Option<PathBuf>,

    /// JSON file holding runtime settings
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Vehicle model name on the dyno
    #[arg(short, long, default_value = "adder")]
    pub model: String,

    /// Vehicle plate on the dyno
    #[arg(long, default_value = "46EEK572")]
    pub plate: String,

    /// Random seed; overrides the settings file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of frames to run
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Frame duration in milliseconds
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub frame_ms: u64,

    /// Gears to pull through
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub gears: u8,

    /// Frame at which the throttle is released
    #[arg(long)]
    pub lift_at: Option<u32>,

    /// Print every Nth frame; frames with an exhaust pulse are always printed
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub every: u32,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Print the built-in default profile
    Default,

    /// Check a profile file and report repaired or rejected records
    Validate {
        /// JSON file holding an array of turbo profiles
        path: PathBuf,
    },

    /// Show which profile applies to a vehicle
    Resolve {
        /// JSON file holding an array of turbo profiles
        path: PathBuf,
        /// Vehicle model name, or a hex model hash
        #[arg(short, long)]
        model: String,
        /// Vehicle plate
        #[arg(long, default_value = "")]
        plate: String,
    },
}
