use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// onsave - compile JavaScript/TypeScript files as they are saved
#[derive(Parser, Debug)]
#[command(name = "onsave")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Workspace root (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Handle saves of the given files once, as the watcher would
    Compile {
        /// Files to compile
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show whether a file would compile and where its output goes
    Resolve {
        /// File to resolve
        file: PathBuf,
    },

    /// Watch the workspace and compile files as they are saved
    Watch,

    /// Write a starter .onsave.toml into the workspace
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}
