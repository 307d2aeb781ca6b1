//! Browsr - an interaction engine for file and folder browsing
//!
//! This library provides the state machinery behind a file browser view:
//! selection with modifier clicks, stable column sorting, drag-and-drop move
//! resolution, context menu routing, and folder tree navigation. The core
//! lives in [`engine`] and is frontend-agnostic; [`ui`] is the bundled
//! terminal host and [`registry`] supplies item snapshots from disk or JSON.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod engine;
pub mod registry;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum BrowsrError {
    /// Registry snapshot error
    #[error("Registry error: {0}")]
    RegistryError(#[from] registry::RegistryError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
