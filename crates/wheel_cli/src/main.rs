//! Wheel CLI
//!
//! Headless spins, full draws and fairness checks from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use wheel_core::calibration::FairnessRunner;
use wheel_core::{draw_order_json, spin_wheel_json, HeadlessRunner, SpinConfig};
use wheel_cli::{format_fairness, format_spin, load_names, resolve_seed};

#[derive(Parser)]
#[command(name = "wheel")]
#[command(about = "Spin a name wheel without a display", long_about = None)]
struct Cli {
    /// Use the quick preset (stronger friction, shorter announcement)
    #[arg(long, global = true, default_value = "false")]
    quick: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin once and print the winner
    Spin {
        /// Comma-separated participants
        #[arg(long)]
        names: Option<String>,

        /// File with one participant per line
        #[arg(long)]
        file: Option<PathBuf>,

        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the JSON response instead of a summary
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Spin until one participant is left
    Draw {
        #[arg(long)]
        names: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Measure the winner distribution over many seeded spins
    Fairness {
        #[arg(long, default_value = "4")]
        participants: usize,

        #[arg(long, default_value = "10000")]
        spins: usize,

        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = if cli.quick { SpinConfig::quick() } else { SpinConfig::classic() };

    match cli.command {
        Commands::Spin { names, file, seed, json } => {
            let roster = load_names(names.as_deref(), file.as_deref())?;
            let seed = resolve_seed(seed);
            log::info!("Spinning {} participants (seed {})", roster.len(), seed);

            if json {
                let request = request_json(&roster, seed, &config);
                println!("{}", spin_wheel_json(&request)?);
            } else {
                let mut runner = HeadlessRunner::with_participants(config, seed, &roster)?;
                let report = runner.spin_once()?;
                println!("{}", format_spin(&report));
            }
        }

        Commands::Draw { names, file, seed, json } => {
            let roster = load_names(names.as_deref(), file.as_deref())?;
            let seed = resolve_seed(seed);
            log::info!("Drawing {} participants (seed {})", roster.len(), seed);

            if json {
                let request = request_json(&roster, seed, &config);
                println!("{}", draw_order_json(&request)?);
            } else {
                let mut runner = HeadlessRunner::with_participants(config, seed, &roster)?;
                for (round, report) in runner.draw_all()?.iter().enumerate() {
                    println!("{:>3}. {}", round + 1, format_spin(report));
                }
                if let Some(last) = runner.session().roster().get(0) {
                    println!("     {} remains", last);
                }
            }
        }

        Commands::Fairness { participants, spins, seed } => {
            println!("🎡 Running {} spins over {} participants...", spins, participants);
            let report = FairnessRunner::new(seed, spins, participants).with_config(config).run()?;
            println!("{}", format_fairness(&report));
        }
    }

    Ok(())
}

fn request_json(roster: &[String], seed: u64, config: &SpinConfig) -> String {
    json!({
        "schema_version": wheel_core::api::SCHEMA_VERSION,
        "seed": seed,
        "participants": roster,
        "config": config,
    })
    .to_string()
}
