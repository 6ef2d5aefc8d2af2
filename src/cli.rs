//! Command-line interface for MeleeSim
//!
//! Supports both graphical (default) and headless modes.

use clap::Parser;
use std::path::PathBuf;

/// Directional melee attack sandbox
#[derive(Parser, Debug)]
#[command(name = "meleesim")]
#[command(about = "Directional melee attack sandbox")]
#[command(version)]
pub struct Args {
    /// Run in headless mode with the specified JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for the combat log (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Override the run length in seconds (headless mode only)
    #[arg(long, value_name = "SECS")]
    pub max_duration: Option<f32>,

    /// Scene to load in graphical mode instead of the built-in training yard
    #[arg(long, value_name = "CONFIG_FILE", conflicts_with = "headless")]
    pub scene: Option<PathBuf>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
