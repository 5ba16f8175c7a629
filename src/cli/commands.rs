use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "retrosavesync")]
#[command(about = "Synchronize emulator saves between local storage and NAS", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    /// Emulator to sync, or `all`
    #[arg(short, long, global = true, default_value = "all")]
    pub emulator: String,

    /// Show what would be synced without actually syncing
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Commands {
    /// Sync all enabled emulators (default)
    Sync,
    /// Choose an initial direction for emulators populated on both sides, then sync
    Init,
    /// Print configuration values
    PrintConfig,
}
