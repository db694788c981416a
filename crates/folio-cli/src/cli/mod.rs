//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use folio_core::config;
use folio_core::theme::ThemeMode;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Animated terminal portfolio")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: $FOLIO_HOME/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Light/dark signal to use instead of the terminal's (a saved preference still wins)
    #[arg(long, value_name = "MODE", value_parser = parse_theme)]
    theme: Option<ThemeMode>,

    /// Do not save theme changes
    #[arg(long = "no-persist")]
    no_persist: bool,
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
    /// Print the config file path
    Path,
    /// Write a commented default config file
    Init,
}

fn parse_theme(value: &str) -> Result<ThemeMode, String> {
    ThemeMode::parse(value).ok_or_else(|| format!("expected 'light' or 'dark', got '{value}'"))
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().or_else(config::paths::config_path);

    let Some(command) = cli.command else {
        return commands::present::run(commands::present::PresentOptions {
            config_path: config_path.as_deref(),
            theme: cli.theme,
            persist: !cli.no_persist,
        });
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(config_path.as_deref()),
            ConfigCommands::Init => commands::config::init(config_path.as_deref()),
        },
    }
}
