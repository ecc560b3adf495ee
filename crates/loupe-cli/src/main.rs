//! Loupe CLI - run and inspect the scroll-driven watch showcase headlessly

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{init, inspect, simulate, timeline};

#[derive(Parser)]
#[command(name = "loupe")]
#[command(about = "Scroll-driven 3D product showcase, simulated headlessly", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default showcase.toml into a directory
    Init {
        /// Target directory
        dir: String,
    },

    /// Scroll through the page and report the camera frame by frame
    Simulate {
        /// Path to showcase file
        #[arg(long)]
        config: Option<String>,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Scroll speed in pixels per second
        #[arg(long, default_value = "600")]
        scroll_speed: f32,

        /// Seconds to keep rendering after the bottom is reached
        #[arg(long, default_value = "3")]
        settle: f64,

        /// Write a JSON snapshot of the final frame
        #[arg(long)]
        snapshot: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Show the inspector panels and the render pipeline
    Inspect {
        /// Path to showcase file
        #[arg(long)]
        config: Option<String>,
    },

    /// List the declared segments and their resolved scroll ranges
    Timeline {
        /// Path to showcase file
        #[arg(long)]
        config: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dir } => init::run(&dir),
        Commands::Simulate {
            config,
            fps,
            scroll_speed,
            settle,
            snapshot,
            format,
        } => simulate::run(simulate::SimulateArgs {
            config,
            fps,
            scroll_speed,
            settle,
            snapshot,
            format,
        }),
        Commands::Inspect { config } => inspect::run(config.as_deref()),
        Commands::Timeline { config } => timeline::run(config.as_deref()),
    }
}
