//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde_json::json;
use turbofix_profile::{ModelHash, TurboProfile};

use crate::commands::profile::RecordCheck;
use crate::commands::simulate::{DynoReport, PulseKind};

pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

pub fn print_profile(profile: &TurboProfile, json: bool) -> serde_json::Result<()> {
    if json {
        let output = json!({ "success": true, "profile": profile });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let turbo = &profile.turbo;
    println!("{}", profile.name.bold());
    println!("  Spool RPM:   {:.2} - {:.2}", turbo.rpm_spool_start, turbo.rpm_spool_end);
    println!("  Boost:       {:.2} to {:.2}", turbo.min_boost, turbo.max_boost);
    println!("  Rates:       spool {:.3}, unspool {:.3}", turbo.spool_rate, turbo.unspool_rate);
    if turbo.falloff_active() {
        println!("  Falloff:     {:.2} at {:.2} RPM", turbo.falloff_boost, turbo.falloff_rpm);
    }
    if profile.boost_by_gear.is_active() {
        let gears: Vec<String> = profile
            .boost_by_gear
            .gears
            .iter()
            .map(|(gear, limit)| format!("{gear}:{limit:.2}"))
            .collect();
        println!("  Gear limits: {}", gears.join(" "));
    }
    let anti_lag = &profile.anti_lag;
    println!(
        "  Anti-lag:    {}",
        if anti_lag.enable {
            format!("on above {:.2} RPM, sound set {}", anti_lag.min_rpm, anti_lag.sound_set)
                .green()
        } else {
            "off".dimmed()
        }
    );
    Ok(())
}

pub fn print_validation(checks: &[RecordCheck], json: bool) -> serde_json::Result<()> {
    if json {
        let output = json!({
            "success": checks.iter().all(|c| c.error.is_none()),
            "profiles": checks,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for check in checks {
        match &check.error {
            Some(error) => println!("  {} {} {}", "✗".red(), check.name.bold(), error),
            None => println!("  {} {}", "✓".green(), check.name.bold()),
        }
        if !check.repaired.is_empty() {
            println!("      {} {}", "repaired:".yellow(), check.repaired.join(", "));
        }
    }
    Ok(())
}

pub fn print_resolution(
    model: &str,
    hash: ModelHash,
    plate: &str,
    profile: &TurboProfile,
    json: bool,
) -> serde_json::Result<()> {
    if json {
        let output = json!({
            "success": true,
            "model": model,
            "model_hash": hash.to_string(),
            "plate": plate,
            "profile": profile.name,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} ({}) plate {:?} -> {}",
        model,
        hash.to_string().dimmed(),
        plate,
        profile.name.bold()
    );
    Ok(())
}

pub fn print_dyno_report(report: &DynoReport, json: bool) -> serde_json::Result<()> {
    if json {
        let output = json!({ "success": true, "run": report });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} ({}) with profile {}",
        "Dyno pull:".bold(),
        report.model,
        report.plate,
        report.profile.as_deref().unwrap_or("none").cyan()
    );
    println!(" frame   time  gear   rpm  thr   boost  pulse");
    for s in &report.samples {
        let pulse = match s.pulse {
            Some(PulseKind::Loud) => "BANG".red().bold(),
            Some(PulseKind::Soft) => "pop".yellow(),
            None => "".normal(),
        };
        println!(
            "{:>6} {:>6} {:>5} {:>5.2} {:>4.1} {:>7.3}  {}",
            s.frame, s.time_ms, s.gear, s.rpm, s.throttle, s.boost, pulse
        );
    }
    println!(
        "peak {:.3}, min {:.3}, {} pulses ({} loud)",
        report.peak_boost, report.min_boost, report.pulses, report.loud_pulses
    );
    Ok(())
}
