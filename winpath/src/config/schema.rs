//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered; see
//! [`Config::settings`] for the fully resolved form.

use serde::{Deserialize, Serialize};

use crate::path::LEGACY_MAX_PATH;

/// Default initial buffer capacity for native queries.
pub const DEFAULT_INITIAL_CAPACITY: usize = LEGACY_MAX_PATH;
/// Default capacity when querying the whole DOS device table.
pub const DEFAULT_DOS_DEVICE_TABLE_CAPACITY: usize = 8192;
/// Default capacity when querying a single DOS device alias.
pub const DEFAULT_DOS_DEVICE_CAPACITY: usize = 256;
/// Default capacity for mount point queries.
pub const DEFAULT_VOLUME_PATH_CAPACITY: usize = 50;
/// Default capacity for volume name queries.
pub const DEFAULT_VOLUME_NAME_CAPACITY: usize = 100;
/// Default number of idle buffers a pool keeps.
pub const DEFAULT_MAX_POOLED_BUFFERS: usize = 4;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use winpath::config::{BufferConfig, Config};
///
/// let config: Config = serde_yaml::from_str("buffers:\n  initial_capacity: 512\n").unwrap();
/// assert_eq!(
///     config.buffers,
///     Some(BufferConfig {
///         initial_capacity: Some(512),
///         ..Default::default()
///     })
/// );
/// assert_eq!(config.settings().buffers.initial_capacity, 512);
/// assert_eq!(config.settings().buffers.volume_name_capacity, 100);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Buffer sizing for native queries.
    pub buffers: Option<BufferConfig>,

    /// Extended-length path handling.
    pub extended_paths: Option<ExtendedPathConfig>,
}

/// Buffer sizing, all in UTF-16 characters.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BufferConfig {
    /// Starting capacity for most queries.
    pub initial_capacity: Option<usize>,

    /// Starting capacity when listing every DOS device alias.
    pub dos_device_table_capacity: Option<usize>,

    /// Starting capacity when resolving one DOS device alias.
    pub dos_device_capacity: Option<usize>,

    /// Starting capacity for mount point queries.
    pub volume_path_capacity: Option<usize>,

    /// Starting capacity for volume name queries.
    pub volume_name_capacity: Option<usize>,

    /// Idle buffers kept for reuse.
    pub max_pooled_buffers: Option<usize>,
}

/// Extended-length path handling.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExtendedPathConfig {
    /// Add the `\\?\` prefix to long paths before native full-path calls.
    pub utilize_extended_syntax: Option<bool>,

    /// Length above which a path counts as long.
    pub legacy_max_path: Option<usize>,
}

/// Resolved buffer sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BufferSettings {
    /// Starting capacity for most queries.
    pub initial_capacity: usize,
    /// Starting capacity when listing every DOS device alias.
    pub dos_device_table_capacity: usize,
    /// Starting capacity when resolving one DOS device alias.
    pub dos_device_capacity: usize,
    /// Starting capacity for mount point queries.
    pub volume_path_capacity: usize,
    /// Starting capacity for volume name queries.
    pub volume_name_capacity: usize,
    /// Idle buffers kept for reuse.
    pub max_pooled_buffers: usize,
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            dos_device_table_capacity: DEFAULT_DOS_DEVICE_TABLE_CAPACITY,
            dos_device_capacity: DEFAULT_DOS_DEVICE_CAPACITY,
            volume_path_capacity: DEFAULT_VOLUME_PATH_CAPACITY,
            volume_name_capacity: DEFAULT_VOLUME_NAME_CAPACITY,
            max_pooled_buffers: DEFAULT_MAX_POOLED_BUFFERS,
        }
    }
}

/// Resolved extended-length path handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtendedPathSettings {
    /// Add the `\\?\` prefix to long paths before native full-path calls.
    pub utilize_extended_syntax: bool,
    /// Length above which a path counts as long.
    pub legacy_max_path: usize,
}

impl Default for ExtendedPathSettings {
    fn default() -> Self {
        Self {
            utilize_extended_syntax: true,
            legacy_max_path: LEGACY_MAX_PATH,
        }
    }
}

/// Fully resolved settings consumed by the library components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Buffer sizing.
    pub buffers: BufferSettings,
    /// Extended-length path handling.
    pub extended_paths: ExtendedPathSettings,
}

impl Config {
    /// Resolve every unset field to its default.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        let buffers = self.buffers.clone().unwrap_or_default();
        let extended = self.extended_paths.clone().unwrap_or_default();
        Settings {
            buffers: BufferSettings {
                initial_capacity: buffers
                    .initial_capacity
                    .unwrap_or(defaults.buffers.initial_capacity),
                dos_device_table_capacity: buffers
                    .dos_device_table_capacity
                    .unwrap_or(defaults.buffers.dos_device_table_capacity),
                dos_device_capacity: buffers
                    .dos_device_capacity
                    .unwrap_or(defaults.buffers.dos_device_capacity),
                volume_path_capacity: buffers
                    .volume_path_capacity
                    .unwrap_or(defaults.buffers.volume_path_capacity),
                volume_name_capacity: buffers
                    .volume_name_capacity
                    .unwrap_or(defaults.buffers.volume_name_capacity),
                max_pooled_buffers: buffers
                    .max_pooled_buffers
                    .unwrap_or(defaults.buffers.max_pooled_buffers),
            },
            extended_paths: ExtendedPathSettings {
                utilize_extended_syntax: extended
                    .utilize_extended_syntax
                    .unwrap_or(defaults.extended_paths.utilize_extended_syntax),
                legacy_max_path: extended
                    .legacy_max_path
                    .unwrap_or(defaults.extended_paths.legacy_max_path),
            },
        }
    }
}
