//! `json-tree-edit`: edit a JSON file interactively.
//!
//! Usage:
//!   json-tree-edit <FILE> [-c CONFIG] [-v...] [--dry-run]
//!
//! Commands are read from stdin, one per line (`help` lists them). On `quit`
//! or end of input the document is written back to FILE.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::info;

use json_tree::Session;
use json_tree_shell::{load_document, save_document, Config, Exit, Shell};

#[derive(Parser, Debug)]
#[command(name = "json-tree-edit", version, about = "Edit a JSON file as a tree")]
struct Cli {
    /// JSON file to edit
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Load configuration from a TOML file
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count)]
    verbosity: u8,

    /// Run the session but never write the file
    #[arg(long)]
    dry_run: bool,
}

fn init_logging(verbosity: u8, configured: Option<&str>) {
    let level = match verbosity {
        0 => configured.unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::default().default_filter_or(level);
    let mut builder = env_logger::Builder::from_env(env);
    if verbosity > 0 {
        builder.parse_filters(level);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).context("failed to load configuration")?,
        None => Config::default(),
    };
    init_logging(cli.verbosity, config.log_level.as_deref());

    let document = load_document(&cli.file)?;
    let mut shell = Shell::new(Session::with_options(document, config.session_options()));

    let exit = shell.run(io::stdin().lock(), &mut io::stdout().lock())?;
    match exit {
        Exit::Save if cli.dry_run => info!("dry run, {} left untouched", cli.file.display()),
        Exit::Save => {
            let document = shell.into_session().into_document();
            save_document(&cli.file, &document, config.indent)?;
        }
        Exit::Discard => info!("edits discarded"),
    }
    Ok(())
}
