//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --verbose, --config) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// deckpub - publish a slide deck to a web server over SSH
#[derive(Parser, Debug)]
#[command(name = "deckpub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./deckpub.toml, then the user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish the deck: mirror it, repoint the latest alias, archive a snapshot
    Publish {
        #[command(flatten)]
        target: PlanArgs,

        /// Dry run - show the commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the derived remote paths and the commands a publish runs
    Plan {
        #[command(flatten)]
        target: PlanArgs,
    },
}

/// Flags that shape the publish plan
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanArgs {
    /// Version label of this publication (e.g. 2023)
    #[arg(short, long)]
    pub instance: Option<String>,

    /// Local deck directory
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,
}
