//! Utility functions for CLI operations.
//!
//! This module provides the global options shared by every command,
//! configuration loading, and construction of the native services.

use std::path::PathBuf;
use std::sync::Arc;

use winpath::{platform, BufferPool, Config, ConfigBuilder, NativeFileService, VolumeResolver};

use crate::error::CliError;
use crate::output::OutputFormat;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Output format.
    pub format: OutputFormat,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. The `--config` file
/// 3. `winpath.yaml` in the working directory
/// 4. `~/.winpath/config.yaml`
/// 5. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// The OS-backed services, sharing one buffer pool.
pub struct NativeServices {
    /// Volume queries.
    pub volumes: VolumeResolver,
    /// Full path, final path, environment and attribute queries.
    pub files: NativeFileService,
}

/// Build the native services for the current platform from the loaded
/// configuration.
pub fn native_services(global: &GlobalOptions) -> Result<NativeServices, CliError> {
    let settings = load_configuration(global)?.settings();
    let query = platform::system();
    let pool = Arc::new(BufferPool::new(settings.buffers.max_pooled_buffers));

    Ok(NativeServices {
        volumes: VolumeResolver::new(Arc::clone(&query), Arc::clone(&pool), settings.buffers),
        files: NativeFileService::new(query, pool, settings),
    })
}
