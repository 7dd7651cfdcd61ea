//! Interactive line-oriented editor for JSON files.
//!
//! The `json-tree-edit` binary loads a file, hands it to a [`json_tree::Session`]
//! driven by [`Shell`], and writes the result back on `quit`.

pub mod config;
pub mod files;
pub mod shell;

pub use config::{Config, ConfigError};
pub use files::{load_document, save_document};
pub use shell::{parse_command, CdTarget, Exit, ParseError, Shell, ShellCommand, HELP};
