//! Terminal frontend for the browser engine
//!
//! The engine itself is frontend-agnostic; this module is the bundled
//! ratatui/crossterm host plus the cell formatting it renders with.

pub mod browser;
pub mod format;

pub use browser::{ActionInvocation, HandlerCall, SessionSummary, run};
