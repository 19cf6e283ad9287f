//! Command-line entry point for skillsync.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use skillsync_core::GlobalRootsConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let Some(command) = cli.command else {
        println!(
            "{} No command given. Run {} for usage.",
            "skillsync".bold(),
            "skillsync --help".cyan()
        );
        return Ok(0);
    };

    // Environment and working directory are read once here; everything
    // below receives them as plain values.
    let cwd = std::env::current_dir()?;
    let globals = GlobalRootsConfig::from_env();

    match command {
        Commands::Discover { roots, format } => {
            commands::run_discover(&cwd, &globals, &roots, format)
        }
        Commands::Audit {
            roots,
            policy,
            output,
        } => commands::run_audit(&cwd, &globals, &roots, &policy, &output),
        Commands::Sync {
            roots,
            policy,
            apply,
            backup_root,
            output,
        } => commands::run_sync(&cwd, &globals, &roots, &policy, apply, &backup_root, &output),
        Commands::Completions { shell } => commands::run_completions(shell),
    }
}
