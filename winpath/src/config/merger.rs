//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{BufferConfig, Config, ExtendedPathConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use winpath::config::{BufferConfig, Config, ConfigMerger};
///
/// let low = Config {
///     buffers: Some(BufferConfig { initial_capacity: Some(100), ..Default::default() }),
///     ..Default::default()
/// };
/// let high = Config {
///     buffers: Some(BufferConfig { initial_capacity: Some(200), ..Default::default() }),
///     ..Default::default()
/// };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.settings().buffers.initial_capacity, 200);
/// ```
#[derive(Debug)]
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Nested sections merge field by field: a field set in `source`
    /// replaces the target's, an unset field leaves it alone.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if let Some(ref source_buffers) = source.buffers {
            let target_buffers = target.buffers.get_or_insert_with(Default::default);
            Self::merge_buffers(target_buffers, source_buffers);
        }

        if let Some(ref source_extended) = source.extended_paths {
            let target_extended = target.extended_paths.get_or_insert_with(Default::default);
            Self::merge_extended_paths(target_extended, source_extended);
        }
    }

    fn merge_buffers(target: &mut BufferConfig, source: &BufferConfig) {
        if source.initial_capacity.is_some() {
            target.initial_capacity = source.initial_capacity;
        }
        if source.dos_device_table_capacity.is_some() {
            target.dos_device_table_capacity = source.dos_device_table_capacity;
        }
        if source.dos_device_capacity.is_some() {
            target.dos_device_capacity = source.dos_device_capacity;
        }
        if source.volume_path_capacity.is_some() {
            target.volume_path_capacity = source.volume_path_capacity;
        }
        if source.volume_name_capacity.is_some() {
            target.volume_name_capacity = source.volume_name_capacity;
        }
        if source.max_pooled_buffers.is_some() {
            target.max_pooled_buffers = source.max_pooled_buffers;
        }
    }

    fn merge_extended_paths(target: &mut ExtendedPathConfig, source: &ExtendedPathConfig) {
        if source.utilize_extended_syntax.is_some() {
            target.utilize_extended_syntax = source.utilize_extended_syntax;
        }
        if source.legacy_max_path.is_some() {
            target.legacy_max_path = source.legacy_max_path;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("source-{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_nested_fields_individually() {
        let low = Config {
            buffers: Some(BufferConfig {
                initial_capacity: Some(100),
                dos_device_capacity: Some(64),
                ..Default::default()
            }),
            ..Default::default()
        };
        let high = Config {
            buffers: Some(BufferConfig {
                initial_capacity: Some(500),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, low), source(2, high)]);
        let buffers = merged.buffers.unwrap();
        assert_eq!(buffers.initial_capacity, Some(500));
        assert_eq!(buffers.dos_device_capacity, Some(64));
        assert_eq!(buffers.volume_name_capacity, None);
    }

    #[test]
    fn test_unset_section_leaves_target() {
        let mut target = Config {
            extended_paths: Some(ExtendedPathConfig {
                utilize_extended_syntax: Some(false),
                legacy_max_path: Some(200),
            }),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(
            target.extended_paths.unwrap().utilize_extended_syntax,
            Some(false)
        );
    }

    #[test]
    fn test_merge_empty_sources() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }
}
