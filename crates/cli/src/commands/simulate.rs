//! Dyno pull through the vehicle runtime

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};
use turbofix_profile::{MemoryProfileStore, ModelHash};
use turbofix_runtime::{Host, RuntimeSettings, VehicleRuntime};

use crate::commands::SimulateArgs;
use crate::commands::profile::{load_profiles, parse_model};
use crate::dyno::{DetachedPatch, DynoCar, DynoScript, GaugeRecorder, PulseLog, sound_sets};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PulseKind {
    Soft,
    Loud,
}

#[derive(Debug, Clone, Serialize)]
pub struct DynoSample {
    pub frame: u32,
    pub time_ms: u64,
    pub gear: u8,
    pub rpm: f32,
    pub throttle: f32,
    pub boost: f32,
    pub dial_boost: Option<f32>,
    pub dial_vacuum: Option<f32>,
    pub pulse: Option<PulseKind>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DynoReport {
    pub profile: Option<String>,
    pub model: String,
    pub plate: String,
    pub frames: u32,
    pub peak_boost: f32,
    pub min_boost: f32,
    pub pulses: u32,
    pub loud_pulses: u32,
    pub samples: Vec<DynoSample>,
}

pub fn execute(args: &SimulateArgs, json: bool) -> Result<()> {
    let report = run(args)?;
    output::print_dyno_report(&report, json)?;
    Ok(())
}

/// Runs the pull described by `args` and collects the trace.
pub fn run(args: &SimulateArgs) -> Result<DynoReport> {
    let mut settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => RuntimeSettings::default(),
    };
    if let Some(seed) = args.seed {
        settings.rng_seed = Some(seed);
    }

    let profiles = match &args.profiles {
        Some(path) => load_profiles(path)?,
        None => Vec::new(),
    };
    let store = MemoryProfileStore::with_profiles(profiles);
    let mut runtime = VehicleRuntime::from_store(settings, &store, sound_sets())?;

    let model: ModelHash = parse_model(&args.model);
    let mut car = DynoCar::new(model, &args.plate);
    let mut pulses = PulseLog::default();
    let mut gauges = GaugeRecorder::default();
    let mut patch = DetachedPatch::default();

    if let Err(e) = runtime.probe_patch(&mut patch) {
        warn!(error = %e, "Boost limiter patch unavailable");
    }

    let script = DynoScript {
        frame_ms: args.frame_ms,
        gears: args.gears,
        lift_at: args.lift_at,
    };
    info!(model = %args.model, plate = %args.plate, frames = args.frames, "Starting dyno pull");

    let mut samples = Vec::new();
    let mut peak_boost = f32::MIN;
    let mut min_boost = f32::MAX;

    for frame in 0..args.frames {
        car.advance(&script, frame);
        pulses.clear_frame();

        let summary = {
            let mut host = Host::new(&mut car, &mut pulses, &mut gauges, &mut patch);
            runtime.tick(&mut host)
        };
        let boost = summary.player_boost.unwrap_or(car.boost);
        peak_boost = peak_boost.max(boost);
        min_boost = min_boost.min(boost);

        let pulse = pulses.frame.as_ref().map(|request| {
            if request.loud {
                PulseKind::Loud
            } else {
                PulseKind::Soft
            }
        });

        if frame.checked_rem(args.every) == Some(0) || pulse.is_some() {
            samples.push(DynoSample {
                frame,
                time_ms: car.now_ms,
                gear: car.gear,
                rpm: car.rpm,
                throttle: car.throttle,
                boost,
                dial_boost: gauges.last.map(|g| g.boost),
                dial_vacuum: gauges.last.map(|g| g.vacuum),
                pulse,
            });
        }
    }

    let profile = runtime.active_profile().map(|p| p.name.clone());
    if let Err(e) = runtime.shutdown(&mut patch) {
        warn!(error = %e, "Boost limiter patch not released");
    }
    debug!(samples = samples.len(), "Dyno pull finished");

    Ok(DynoReport {
        profile,
        model: args.model.clone(),
        plate: args.plate.clone(),
        frames: args.frames,
        peak_boost,
        min_boost,
        pulses: pulses.total,
        loud_pulses: pulses.loud,
        samples,
    })
}

fn load_settings(path: &Path) -> Result<RuntimeSettings, CliError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::InvalidConfiguration(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: SimulateArgs,
    }

    fn args(extra: &[&str]) -> Result<SimulateArgs, clap::Error> {
        let argv = std::iter::once("simulate").chain(extra.iter().copied());
        Wrapper::try_parse_from(argv).map(|w| w.args)
    }

    #[test]
    fn test_pull_builds_boost_with_default_profile() -> Result<(), Box<dyn std::error::Error>> {
        let report = run(&args(&["--seed", "1", "--frames", "300"])?)?;

        assert_eq!(report.profile.as_deref(), Some("default"));
        assert!(report.peak_boost > 0.9 && report.peak_boost <= 1.0);
        assert_eq!(report.samples.len(), 300);
        assert!(report.samples.iter().all(|s| s.dial_boost.is_some()));
        Ok(())
    }

    #[test]
    fn test_sampling_interval() -> Result<(), Box<dyn std::error::Error>> {
        let report = run(&args(&["--seed", "1", "--frames", "100", "--every", "25"])?)?;

        let frames: Vec<u32> = report.samples.iter().map(|s| s.frame).collect();
        assert_eq!(frames, vec![0, 25, 50, 75]);
        Ok(())
    }

    #[test]
    fn test_lift_drops_into_vacuum() -> Result<(), Box<dyn std::error::Error>> {
        let report = run(&args(&["--seed", "1", "--frames", "400", "--lift-at", "200"])?)?;

        assert!(report.min_boost < 0.0);
        assert_eq!(report.pulses, 0);
        Ok(())
    }
}
