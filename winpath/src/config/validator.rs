//! Configuration validation.

use crate::config::schema::{BufferConfig, Config, ExtendedPathConfig};
use crate::error::{Error, Result};
use crate::path::MAX_LONG_PATH;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use winpath::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
#[derive(Debug)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref buffers) = config.buffers {
            Self::validate_buffers(buffers)?;
        }
        if let Some(ref extended) = config.extended_paths {
            Self::validate_extended_paths(extended)?;
        }
        Ok(())
    }

    /// Buffer capacities must be positive. A pool may retain nothing.
    fn validate_buffers(buffers: &BufferConfig) -> Result<()> {
        let capacities = [
            ("buffers.initial_capacity", buffers.initial_capacity),
            (
                "buffers.dos_device_table_capacity",
                buffers.dos_device_table_capacity,
            ),
            ("buffers.dos_device_capacity", buffers.dos_device_capacity),
            ("buffers.volume_path_capacity", buffers.volume_path_capacity),
            ("buffers.volume_name_capacity", buffers.volume_name_capacity),
        ];
        for (field, value) in capacities {
            if value == Some(0) {
                return Err(Error::Validation {
                    field: field.into(),
                    message: "Capacity must be greater than 0".into(),
                });
            }
        }
        Ok(())
    }

    fn validate_extended_paths(extended: &ExtendedPathConfig) -> Result<()> {
        if let Some(limit) = extended.legacy_max_path {
            if !(1..=MAX_LONG_PATH).contains(&limit) {
                return Err(Error::Validation {
                    field: "extended_paths.legacy_max_path".into(),
                    message: format!("Must be between 1 and {MAX_LONG_PATH}, got {limit}"),
                });
            }
        }
        Ok(())
    }
}
