//! Hexmarch - command line entry point
//!
//! `generate` builds a fresh world from a seed and writes it as JSON;
//! `run` loads a world, advances it a number of turns, and writes the
//! result back out.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hexmarch::catalog::Catalog;
use hexmarch::core::config::WorldConfig;
use hexmarch::core::error::Result;
use hexmarch::persist::WorldRecord;
use hexmarch::turn::TurnEngine;
use hexmarch::world::topology::GeometryMode;
use hexmarch::worldgen;

#[derive(Parser)]
#[command(name = "hexmarch", about = "Turn-based world simulation engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new world and write it to a file
    Generate {
        /// Seed for the world generator
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Surface width (rectangular mode)
        #[arg(long, default_value_t = 32)]
        width: i32,
        /// Surface height (rectangular mode)
        #[arg(long, default_value_t = 32)]
        height: i32,
        /// Use an icosahedral surface at this scale instead
        #[arg(long)]
        ico: Option<i32>,
        /// Optional TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output path
        #[arg(long, default_value = "world.json")]
        out: PathBuf,
    },
    /// Load a world, run turns, and write it back
    Run {
        /// World file produced by `generate`
        #[arg(long)]
        world: PathBuf,
        /// Number of turns to advance
        #[arg(long, default_value_t = 1)]
        turns: u32,
        /// Optional TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output path (defaults to the input path)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hexmarch=info")),
        )
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::standard();

    match cli.command {
        Command::Generate {
            seed,
            width,
            height,
            ico,
            config,
            out,
        } => {
            let mut config = load_config(config)?;
            config.seed = seed;
            let mode = match ico {
                Some(scale) => GeometryMode::Icosahedral { scale },
                None => GeometryMode::Rectangular { width, height },
            };
            let graph = worldgen::generate(&config, mode, &catalog)?;
            let record = WorldRecord::capture(&graph, &catalog);
            fs::write(&out, serde_json::to_string_pretty(&record)?)?;
            tracing::info!(
                regions = graph.regions.len(),
                path = %out.display(),
                "world written"
            );
        }
        Command::Run {
            world,
            turns,
            config,
            out,
        } => {
            let config = load_config(config)?;
            let record: WorldRecord = serde_json::from_str(&fs::read_to_string(&world)?)?;
            let mut graph = record.apply(&catalog)?;
            let mut engine = TurnEngine::new(config);
            for _ in 0..turns {
                engine.run_turn(&mut graph, &catalog);
            }
            let out = out.unwrap_or(world);
            let record = WorldRecord::capture(&graph, &catalog);
            fs::write(&out, serde_json::to_string_pretty(&record)?)?;
            tracing::info!(
                turns,
                population = graph.total_population(),
                path = %out.display(),
                "run complete"
            );
        }
    }
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<WorldConfig> {
    match path {
        Some(path) => WorldConfig::from_toml_str(&fs::read_to_string(path)?),
        None => Ok(WorldConfig::default()),
    }
}
