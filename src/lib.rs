//! Posterboard application library
//!
//! Application modules plus the bootstrap used by the server binary and the CLI.

pub mod app;
pub mod modules;

pub use modules::*;
