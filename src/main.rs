use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use termsnake::app::App;
use termsnake::audio::{Muted, TerminalBell};
use termsnake::game::GameConfig;

#[derive(Parser)]
#[command(name = "termsnake")]
#[command(version, about = "Classic snake for the terminal")]
struct Cli {
    /// Path to a JSON config file; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation ticks per second
    #[arg(long)]
    fps: Option<u64>,

    /// Food items spawned at game start
    #[arg(long)]
    food: Option<u32>,

    /// Obstacles spawned at game start
    #[arg(long)]
    obstacles: Option<u32>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Write tracing output to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(path: &PathBuf) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(fps) = cli.fps {
        config.tick_hz = fps;
    }
    if let Some(food) = cli.food {
        config.food_count = food;
    }
    if let Some(obstacles) = cli.obstacles {
        config.obstacle_count = obstacles;
    }

    if cli.mute {
        App::new(config, Muted)?.run().await
    } else {
        App::new(config, TerminalBell)?.run().await
    }
}
