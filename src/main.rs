//! onsave CLI - compile-on-save for JavaScript and TypeScript
//!
//! Usage: onsave <COMMAND>
//!
//! Commands:
//!   compile  Handle saves of the given files once
//!   resolve  Show the filter decision and output paths for a file
//!   watch    Watch the workspace and compile on save
//!   init     Write a starter .onsave.toml

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let workspace = commands::workspace_root(cli.workspace.as_deref())?;

    match cli.command {
        Commands::Compile { files } => {
            commands::compile::cmd_compile(&workspace, &files, cli.json, cli.verbose)
        }
        Commands::Resolve { file } => {
            commands::resolve::cmd_resolve(&workspace, &file, cli.json, cli.verbose)
        }
        Commands::Watch => commands::watch::cmd_watch(&workspace, cli.json, cli.verbose),
        Commands::Init { force } => commands::init::cmd_init(&workspace, force, cli.json),
    }
}
