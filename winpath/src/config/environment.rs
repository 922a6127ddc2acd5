//! Environment variable handling for configuration overrides.
//!
//! `WINPATH_*` variables override configuration file values.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// `buffers.initial_capacity`
pub const ENV_INITIAL_CAPACITY: &str = "WINPATH_INITIAL_CAPACITY";
/// `buffers.dos_device_table_capacity`
pub const ENV_DOS_DEVICE_TABLE_CAPACITY: &str = "WINPATH_DOS_DEVICE_TABLE_CAPACITY";
/// `buffers.dos_device_capacity`
pub const ENV_DOS_DEVICE_CAPACITY: &str = "WINPATH_DOS_DEVICE_CAPACITY";
/// `buffers.volume_path_capacity`
pub const ENV_VOLUME_PATH_CAPACITY: &str = "WINPATH_VOLUME_PATH_CAPACITY";
/// `buffers.volume_name_capacity`
pub const ENV_VOLUME_NAME_CAPACITY: &str = "WINPATH_VOLUME_NAME_CAPACITY";
/// `buffers.max_pooled_buffers`
pub const ENV_MAX_POOLED_BUFFERS: &str = "WINPATH_MAX_POOLED_BUFFERS";
/// `extended_paths.utilize_extended_syntax`
pub const ENV_UTILIZE_EXTENDED_SYNTAX: &str = "WINPATH_UTILIZE_EXTENDED_SYNTAX";
/// `extended_paths.legacy_max_path`
pub const ENV_LEGACY_MAX_PATH: &str = "WINPATH_LEGACY_MAX_PATH";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use winpath::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
#[derive(Debug)]
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value, e.g. a
    /// non-numeric capacity or an unrecognized boolean.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        Self::apply_buffer_overrides(config)?;

        if let Ok(value) = env::var(ENV_UTILIZE_EXTENDED_SYNTAX) {
            let enabled = Self::parse_bool(ENV_UTILIZE_EXTENDED_SYNTAX, &value)?;
            let extended = config.extended_paths.get_or_insert_with(Default::default);
            extended.utilize_extended_syntax = Some(enabled);
        }

        if let Ok(value) = env::var(ENV_LEGACY_MAX_PATH) {
            let limit = Self::parse_usize(ENV_LEGACY_MAX_PATH, &value)?;
            let extended = config.extended_paths.get_or_insert_with(Default::default);
            extended.legacy_max_path = Some(limit);
        }

        Ok(())
    }

    fn apply_buffer_overrides(config: &mut Config) -> Result<()> {
        let mut buffers = config.buffers.clone().unwrap_or_default();
        let mut modified = false;
        let fields = [
            (ENV_INITIAL_CAPACITY, &mut buffers.initial_capacity),
            (
                ENV_DOS_DEVICE_TABLE_CAPACITY,
                &mut buffers.dos_device_table_capacity,
            ),
            (ENV_DOS_DEVICE_CAPACITY, &mut buffers.dos_device_capacity),
            (ENV_VOLUME_PATH_CAPACITY, &mut buffers.volume_path_capacity),
            (ENV_VOLUME_NAME_CAPACITY, &mut buffers.volume_name_capacity),
            (ENV_MAX_POOLED_BUFFERS, &mut buffers.max_pooled_buffers),
        ];
        for (name, field) in fields {
            if let Ok(value) = env::var(name) {
                *field = Some(Self::parse_usize(name, &value)?);
                modified = true;
            }
        }

        if modified {
            config.buffers = Some(buffers);
        }
        Ok(())
    }

    fn parse_usize(field: &str, s: &str) -> Result<usize> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }

    /// Parse boolean from string.
    ///
    /// Accepts: true/false, 1/0, yes/no, on/off (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
