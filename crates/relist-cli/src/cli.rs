use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Parser)]
#[command(
    name = "relist",
    about = "Reconcile ordered collections: deletes, inserts, moves and reloads",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with default settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the edit script between two JSON snapshots
    Diff(DiffArgs),
    /// Check that a JSON snapshot has unique identities
    Check(CheckArgs),
}

#[derive(Args)]
pub struct KeyArgs {
    /// Treat snapshots as arrays of sections holding rows
    #[arg(long)]
    pub sectioned: bool,
    #[arg(long)]
    pub id_key: Option<String>,
    #[arg(long)]
    pub items_key: Option<String>,
}

#[derive(Args)]
pub struct DiffArgs {
    pub from: PathBuf,
    pub to: PathBuf,
    #[command(flatten)]
    pub keys: KeyArgs,
    /// Replay the script against FROM and require it to reproduce TO
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    pub file: PathBuf,
    #[command(flatten)]
    pub keys: KeyArgs,
}
