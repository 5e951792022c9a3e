// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for running the overlay.
//!
//! This module contains the command-line interface logic, including argument parsing,
//! console logging, and the `detect` command implementation.

/// CLI arguments.
pub mod args;

/// Console logging macros and verbosity.
pub mod logging;

/// Detect command logic.
pub mod overlay;
