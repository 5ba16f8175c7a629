mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::commands::{Cli, Commands};
use cli::progress::CliReporter;
use cli::prompt;
use colored::*;
use dotenv::dotenv;
use retro_save_sync::config::{load_configuration, RawConfig};
use retro_save_sync::{SyncEngine, SyncOptions, SyncResult};
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv().ok();

    let _guard = cli::logging::init_logger();

    let args = Cli::parse();

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Cli) -> anyhow::Result<ExitCode> {
    if !args.config.exists() {
        eprintln!(
            "Error: Configuration file '{}' not found",
            args.config.display()
        );
        eprintln!("Please create a config.json file. See config.example.json for reference.");
        return Ok(ExitCode::from(1));
    }

    match args.command.unwrap_or(Commands::Sync) {
        Commands::Sync => run_sync(args),
        Commands::Init => run_init(args),
        Commands::PrintConfig => {
            print_config(&args.config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_engine(args: &Cli) -> anyhow::Result<SyncEngine> {
    let config =
        load_configuration(&args.config).context("Error loading configuration")?;
    Ok(SyncEngine::new(config).with_dry_run(args.dry_run))
}

fn base_options(args: &Cli) -> SyncOptions {
    match args.emulator.as_str() {
        "all" => SyncOptions::default(),
        key => SyncOptions::only(key),
    }
}

fn run_sync(args: &Cli) -> anyhow::Result<ExitCode> {
    let engine = build_engine(args)?;
    let reporter = CliReporter::new();
    let result = engine.run(&base_options(args), &reporter)?;
    Ok(print_summary(&result))
}

fn run_init(args: &Cli) -> anyhow::Result<ExitCode> {
    let engine = build_engine(args)?;
    let mut options = base_options(args);

    let ambiguous: Vec<(String, String)> = engine
        .groups_needing_direction()
        .into_iter()
        .filter(|group| options.only.as_deref().map_or(true, |key| key == group.key))
        .map(|group| (group.key.clone(), group.name.clone()))
        .collect();

    if ambiguous.is_empty() {
        info!("No emulator has saves on both sides; running a normal sync");
    }

    for (key, name) in &ambiguous {
        let direction = prompt::prompt_direction(name)?;
        options = options.with_direction(key, direction);
    }

    if !ambiguous.is_empty() && !prompt::prompt_confirm("Start synchronization?", true)? {
        return Ok(ExitCode::SUCCESS);
    }

    let reporter = CliReporter::new();
    let result = engine.run(&options, &reporter)?;
    Ok(print_summary(&result))
}

fn print_config(path: &Path) -> anyhow::Result<()> {
    let raw = RawConfig::load(path).context("Error loading configuration")?;
    let rendered = toml::to_string_pretty(&raw).context("Error rendering configuration")?;
    println!("{}", rendered);
    Ok(())
}

fn print_summary(result: &SyncResult) -> ExitCode {
    let stats = &result.stats;

    println!();
    println!("{}", "=".repeat(60));
    println!("Synchronization complete!");
    println!("  Uploaded: {}", format!("{}", stats.uploaded).green());
    println!("  Downloaded: {}", format!("{}", stats.downloaded).cyan());
    println!("  Skipped: {}", stats.skipped);
    println!("  Backed up: {}", format!("{}", stats.backed_up).magenta());
    println!("  Errors: {}", format!("{}", stats.errors).red());
    println!("{}", "=".repeat(60));
    info!(
        "{} emulators, {} files transferred in {}",
        result.groups_synced,
        stats.transferred(),
        format!("{:.2}s", result.duration.as_secs_f64()).green(),
    );

    if stats.errors > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
