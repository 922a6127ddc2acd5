//! Library exports for winpath-cli.
//!
//! The binary is a thin shell over these modules; exposing them lets
//! tests and tooling reuse the CLI definition.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod utils;

// Re-export CLI for tooling
pub use cli::Cli;
