use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "luminara", version, author, about = "A terminal learning companion with guided tutoring and progress tracking")]
pub struct Cli {
    /// Start the TUI as if no camera were attached
    #[arg(long)]
    pub no_camera: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show stats, goals and subject progress
    Stats,
    /// List achievements with rarity and progress
    Achievements,
    /// Print the current progress snapshot as JSON
    Export,
    /// Show the config file location
    Config {
        /// Write a config file with default values
        #[arg(long)]
        init: bool,
    },
}
