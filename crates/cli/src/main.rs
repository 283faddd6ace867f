//! modclash command-line tool.
//!
//! Reads the game's settings file, resolves every enabled mod to the set of
//! files it ships, and reports files provided by more than one mod. Also
//! provides helpers for inspecting script files and generating a config.

mod check;
mod dump;
mod list;
mod style;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use modclash_core::config::AppConfig;
use modclash_core::conflict::ReportFormat;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Find files that more than one enabled Paradox mod overrides.
#[derive(Parser, Debug)]
#[command(name = "modclash", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    /// Defaults to `<config dir>/modclash/config.toml` when it exists.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Game user directory (overrides the config file).
    #[arg(long, global = true)]
    user_dir: Option<String>,

    /// Log more detail (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect conflicts between enabled mods and write a report.
    Check {
        /// Report file (overrides `report.output`).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format: text or json (overrides `report.format`).
        #[arg(long)]
        format: Option<ReportFormat>,
    },

    /// List enabled mods with their sources and file counts.
    Mods,

    /// Parse a script file and print its element tree.
    Dump {
        /// File to parse (settings.txt, *.mod, ...).
        file: PathBuf,

        /// Print the tree as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate a default configuration file.
    Init {
        /// Output path for the generated config file.
        #[arg(short, long, default_value = "./modclash.toml")]
        output: PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // `init` writes a fresh config and never reads an existing one.
    let config = match cli.command {
        Commands::Init { .. } => AppConfig::default(),
        _ => load_config(cli.config.as_deref())?,
    };
    init_tracing(&config, cli.verbose);

    match cli.command {
        Commands::Init { output, force } => cmd_init(&output, force),
        Commands::Dump { file, json } => dump::run_dump(&file, json),
        Commands::Check { output, format } => {
            let user_dir = resolve_user_dir(&config, cli.user_dir.as_deref())?;
            check::run_check(&config, &user_dir, output, format)
        }
        Commands::Mods => {
            let user_dir = resolve_user_dir(&config, cli.user_dir.as_deref())?;
            list::run_mods(&config, &user_dir)
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` flags raise the configured level.
fn init_tracing(config: &AppConfig, verbose: u8) {
    let level = match verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}

// ---------------------------------------------------------------------------
// Config helpers
// ---------------------------------------------------------------------------

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("modclash").join("config.toml"))
}

/// An explicit `--config` must exist; the default location is optional.
fn load_config(explicit: Option<&str>) -> Result<AppConfig> {
    let path = match explicit {
        Some(path) => expand_tilde(path),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => return Ok(AppConfig::default()),
        },
    };

    AppConfig::load_and_validate(&path)
        .with_context(|| format!("failed to load configuration {}", path.display()))
}

/// Game user directory: `--user-dir`, then `game.user_dir`, then the
/// platform documents folder.
fn resolve_user_dir(config: &AppConfig, explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(expand_tilde(dir));
    }

    let fallback = dirs::document_dir()
        .map(|docs| docs.join("Paradox Interactive").join("Stellaris"));
    let dir = config
        .user_dir_or(fallback)
        .context("cannot locate the game user directory; pass --user-dir")?;
    Ok(expand_tilde(&dir.to_string_lossy()))
}

/// Expand `~` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_init(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            output.display()
        );
    }

    std::fs::write(output, AppConfig::default_template())
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{}",
        style::success(&format!(
            "Default configuration written to {}",
            output.display()
        ))
    );
    println!();
    println!("Next steps:");
    println!("  1. Set game.user_dir if the game is not in your documents folder");
    println!("  2. Run `modclash --config {} check`", output.display());
    Ok(())
}
