mod animation;
mod cli;
mod config;
mod data;
mod models;
mod platform;
mod progress;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use data::MockProvider;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;
    let provider = MockProvider::new();

    match cli.command {
        Some(Commands::Stats) => handlers::handle_stats(&provider)?,
        Some(Commands::Achievements) => handlers::handle_achievements(&provider)?,
        Some(Commands::Export) => handlers::handle_export(&provider)?,
        Some(Commands::Config { init }) => handlers::handle_config(&config, init)?,

        // No subcommand → launch TUI
        None => {
            info!("starting TUI (tick {} ms)", config.ui.tick_rate_ms);
            tui::app::run(config, cli.no_camera)?;
        }
    }

    Ok(())
}
