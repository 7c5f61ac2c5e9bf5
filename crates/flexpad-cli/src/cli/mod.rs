//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use flexpad_core::config;

mod commands;

#[derive(Parser)]
#[command(name = "flexpad")]
#[command(version)]
#[command(about = "FlexPad terminal text editor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File to open on startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let Cli {
        command,
        file,
        config,
    } = Cli::parse();
    let config_path = config.unwrap_or_else(config::paths::config_path);

    // default to the editor
    let Some(command) = command else {
        return commands::edit::run(&config_path, file.as_deref());
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path(&config_path);
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(&config_path),
        },
    }
}
