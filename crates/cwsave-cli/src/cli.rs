use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cwsave",
    about = "Find the Cube World save directory and list its characters",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file overriding the built-in search names
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the save directory and how it was found
    Locate,
    /// List every character in the database
    List(ListArgs),
    /// Show one character
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Load this database instead of searching for one
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Position of the character in the list
    pub index: usize,
    /// Load this database instead of searching for one
    #[arg(long)]
    pub db: Option<PathBuf>,
}
