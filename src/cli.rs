//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for browsr using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Open the interactive browser over a directory or snapshot (default)
//! - **init**: Write a sample registry snapshot to disk
//! - **check**: Validate a registry snapshot without opening the browser
//!
//! # Design Features
//!
//! - Global `--quiet` flag for scripting-friendly output
//! - Command aliases (e.g., `b` for `browse`, `c` for `check`)
//! - Sort defaults overridable per invocation with `--sort`/`--desc`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::engine::{SortDirection, SortField, SortState};

/// Sort column selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortFieldArg {
    /// Sort by item name
    Name,
    /// Sort by file size (folders sort together)
    Size,
    /// Sort by upload date
    Date,
    /// Sort by uploader identity
    Uploader,
}

impl From<SortFieldArg> for SortField {
    fn from(arg: SortFieldArg) -> Self {
        match arg {
            SortFieldArg::Name => Self::Name,
            SortFieldArg::Size => Self::Size,
            SortFieldArg::Date => Self::Date,
            SortFieldArg::Uploader => Self::Uploader,
        }
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "browsr")]
#[command(about = "An interactive file and folder browser", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive browser (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Directory to browse, or a `.json` registry snapshot
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Initial sort column
        #[arg(short = 's', long = "sort", value_enum)]
        sort: Option<SortFieldArg>,

        /// Sort descending instead of ascending
        #[arg(long = "desc", requires = "sort")]
        descending: bool,
    },

    /// Write a sample registry snapshot
    #[command(visible_alias = "i")]
    Init {
        /// Where to write the snapshot
        #[arg(value_name = "PATH", default_value = "registry.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },

    /// Validate a registry snapshot without opening the browser
    #[command(visible_alias = "c")]
    Check {
        /// Snapshot to validate
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command to execute, defaulting to browsing the current directory
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            path: PathBuf::from("."),
            sort: None,
            descending: false,
        })
    }
}

/// Build the initial sort state from CLI flags
#[must_use]
pub fn sort_state_from_args(sort: Option<SortFieldArg>, descending: bool) -> Option<SortState> {
    sort.map(|field| SortState {
        field: field.into(),
        direction: if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_browses_current_directory() {
        let cli = Cli { command: None, quiet: false };
        match cli.get_command() {
            Commands::Browse { path, sort, descending } => {
                assert_eq!(path, PathBuf::from("."));
                assert!(sort.is_none());
                assert!(!descending);
            }
            other => panic!("unexpected default command: {other:?}"),
        }
    }

    #[test]
    fn test_sort_state_from_args() {
        assert!(sort_state_from_args(None, false).is_none());

        let state = sort_state_from_args(Some(SortFieldArg::Date), true).unwrap();
        assert_eq!(state.field, SortField::Date);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn test_cli_parses_browse_with_sort() {
        let cli = Cli::try_parse_from(["browsr", "browse", "/tmp", "--sort", "size", "--desc"]).unwrap();
        match cli.get_command() {
            Commands::Browse { path, sort, descending } => {
                assert_eq!(path, PathBuf::from("/tmp"));
                assert_eq!(sort, Some(SortFieldArg::Size));
                assert!(descending);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
