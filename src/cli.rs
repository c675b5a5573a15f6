use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dockerconf - Resolve Docker install and daemon configuration per platform
#[derive(Parser)]
#[command(name = "dockerconf")]
#[command(about = "Resolves Docker parameters and OS facts into declarative resources")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve parameters and facts into resource descriptors (JSON on stdout)
    Resolve {
        /// Path to the parameters JSON file (omit for all defaults)
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Path to the OS facts JSON file
        #[arg(short, long)]
        facts: PathBuf,

        /// Emit descriptors in apply order instead of resolution order
        #[arg(long)]
        ordered: bool,
    },
    /// Validate a parameters file
    Validate {
        /// Path to the parameters JSON file to validate
        params: PathBuf,
    },
    /// List the platform policy table
    Platforms,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
