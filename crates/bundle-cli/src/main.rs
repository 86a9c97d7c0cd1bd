//! bundlectl
//!
//! The command-line interface for resolving, querying and patching
//! component bundles.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Component bundle CLI", "bundlectl".green().bold());
            println!();
            println!("Run {} for available commands.", "bundlectl --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Inline {
            input,
            output,
            top_layer_only,
            format,
        } => commands::run_inline(&input, output.as_deref(), top_layer_only, format),
        Commands::Find {
            input,
            component,
            version,
            api_version,
            kind,
            name,
        } => {
            let filter = commands::FindFilter {
                component,
                version,
                api_version,
                kind,
                name,
            };
            commands::run_find(&input, &filter)
        }
        Commands::Images {
            input,
            by_component,
        } => commands::run_images(&input, by_component),
        Commands::PatchImages {
            input,
            rules,
            output,
            format,
        } => commands::run_patch_images(&input, &rules, output.as_deref(), format),
    }
}
