//! turboctl - TurboFix command-line tools
//!
//! Runs scripted dyno pulls through the vehicle runtime and inspects turbo
//! profiles without a game host.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod dyno;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::*;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "turboctl")]
#[command(about = "TurboFix CLI - Dyno runs and turbo profile tools")]
#[command(version)]
#[command(long_about = "
turboctl drives the TurboFix boost simulation headlessly. It runs scripted
dyno pulls against a profile collection and prints the boost trace, and it
validates, resolves and prints turbo profiles.

Use --json for machine-readable output.
")]
pub(crate) struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted wide-open-throttle pull and print the boost trace
    Simulate(SimulateArgs),

    /// Turbo profile commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[expect(clippy::exit, reason = "the exit code reports the error kind")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("turboctl={log_level},turbofix_runtime={log_level},turbofix_profile={log_level}")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Simulate(args) => commands::simulate::execute(args, cli.json),
        Commands::Profile(cmd) => commands::profile::execute(cmd, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}
