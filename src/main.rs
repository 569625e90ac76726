//! Theming - branding override CLI
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use theming::cli::{commands, Cli, Commands};
use theming::config::{Config, ConfigManager};
use theming::error::{ThemingError, ThemingResult};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ThemingResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    // Config commands must work even when the file is broken
    let loaded = config_manager.load().await;
    let log_format = loaded
        .as_ref()
        .map(|c| c.general.log_format.as_str())
        .unwrap_or("text");
    init_logging(cli.verbose, log_format);

    if let Commands::Config(args) = cli.command {
        let config = loaded.unwrap_or_else(|e| {
            debug!("Falling back to default config: {}", e);
            Config::default()
        });
        return commands::config(args, &config_manager, &config).await;
    }

    if let Some(path) = cli.config.as_ref().filter(|p| !p.exists()) {
        return Err(ThemingError::ConfigNotFound(path.clone()));
    }
    let config = loaded?;
    debug!("Loaded config from {}", config_manager.path().display());

    let theming = theming::create_theming(&config).await?;

    match cli.command {
        Commands::Config(_) => unreachable!("Config handled above"),
        Commands::Show(args) => commands::show(args, &theming).await,
        Commands::Get(args) => commands::get(args, &theming).await,
        Commands::Set(args) => commands::set(args, &theming).await,
        Commands::Undo(args) => commands::undo(args, &theming).await,
        Commands::Vars(args) => commands::vars(args, &theming).await,
        Commands::ImagePath(args) => commands::image_path(args, &theming).await,
        Commands::Footer => commands::footer(&theming).await,
        Commands::Logo(args) => commands::logo(args, &theming).await,
        Commands::Icons => commands::icons(&theming).await,
    }
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("theming=warn"),
        1 => EnvFilter::new("theming=info"),
        _ => EnvFilter::new("theming=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
