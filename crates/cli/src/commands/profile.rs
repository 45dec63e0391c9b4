//! Turbo profile commands

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;
use turbofix_profile::{ModelHash, ProfileSet, TurboProfile, sanitize_profile, validate_profile};

use crate::commands::ProfileCommands;
use crate::error::CliError;
use crate::output;

pub fn execute(cmd: &ProfileCommands, json: bool) -> Result<()> {
    match cmd {
        ProfileCommands::Default => {
            output::print_profile(&TurboProfile::default_profile(), json)?;
            Ok(())
        }
        ProfileCommands::Validate { path } => validate_file(path, json),
        ProfileCommands::Resolve { path, model, plate } => resolve(path, model, plate, json),
    }
}

/// Outcome of checking one record in a profile file.
#[derive(Debug, Clone, Serialize)]
pub struct RecordCheck {
    pub name: String,
    pub repaired: Vec<&'static str>,
    pub error: Option<String>,
}

/// Reads a JSON array of profiles. Missing fields take built-in defaults.
pub fn load_profiles(path: &Path) -> Result<Vec<TurboProfile>, CliError> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::ProfileNotFound(format!("{}: {e}", path.display())))?;
    let profiles: Vec<TurboProfile> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), count = profiles.len(), "Read profile file");
    Ok(profiles)
}

/// Accepts a model name or a `0x`-prefixed hash.
pub fn parse_model(model: &str) -> ModelHash {
    let trimmed = model.trim();
    if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        if let Ok(hash) = trimmed.parse() {
            return hash;
        }
    }
    ModelHash::from_name(trimmed)
}

pub fn check_records(profiles: Vec<TurboProfile>) -> Vec<RecordCheck> {
    profiles
        .into_iter()
        .map(|mut profile| {
            let repaired = sanitize_profile(&mut profile);
            let error = validate_profile(&profile).err().map(|e| e.to_string());
            RecordCheck {
                name: profile.name,
                repaired,
                error,
            }
        })
        .collect()
}

fn validate_file(path: &Path, json: bool) -> Result<()> {
    let checks = check_records(load_profiles(path)?);
    output::print_validation(&checks, json)?;

    let rejected = checks.iter().filter(|c| c.error.is_some()).count();
    if rejected > 0 {
        return Err(CliError::ValidationError(format!(
            "{rejected} of {} profiles rejected",
            checks.len()
        ))
        .into());
    }
    Ok(())
}

fn resolve(path: &Path, model: &str, plate: &str, json: bool) -> Result<()> {
    let set = ProfileSet::new(load_profiles(path)?);
    let hash = parse_model(model);
    let handle = set.resolve(hash, plate);
    let profile = set
        .get(handle)
        .ok_or_else(|| CliError::ProfileNotFound(format!("{model} {plate}")))?;

    output::print_resolution(model, hash, plate, profile, json)?;
    Ok(())
}
