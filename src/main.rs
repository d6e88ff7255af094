//! deckpub CLI - publish a slide deck to a web server over SSH
//!
//! Usage: deckpub <COMMAND>
//!
//! Commands:
//!   publish  Mirror the deck, repoint the latest alias, archive a snapshot
//!   plan     Show the derived paths and the commands a publish runs

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use deckpub::presentation::cli::{Cli, Commands};

mod commands;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    if let Err(err) = run(cli) {
        commands::print_error(&err, json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Publish { target, dry_run } => {
            commands::publish::cmd_publish(&target, config, dry_run, cli.json, cli.verbose)
        }
        Commands::Plan { target } => commands::plan::cmd_plan(&target, config, cli.json),
    }
}

/// Diagnostics go to stderr; `DECKPUB_LOG` overrides the `-v` level
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("DECKPUB_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("deckpub={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
