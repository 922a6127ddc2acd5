//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the per-directory configuration file.
pub const PROJECT_CONFIG_FILE: &str = "winpath.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use winpath::config::ConfigSource;
///
/// let user_config = ConfigSource {
///     path: PathBuf::from("~/.winpath/config.yaml"),
///     precedence: 1,
///     config: Default::default(),
/// };
/// assert_eq!(user_config.precedence, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from the file system.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use winpath::config::ConfigLoader;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None, None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. User config at `~/.winpath/config.yaml` (precedence 1), or
    ///    `{user_dir}/config.yaml` when `user_dir` is given
    /// 2. `winpath.yaml` in `working_dir` (precedence 2)
    /// 3. `explicit_file` (precedence 3), which must exist
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed, or
    /// if `explicit_file` does not exist.
    pub fn load_all(
        working_dir: &Path,
        user_dir: Option<&Path>,
        explicit_file: Option<&Path>,
    ) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(user_dir)? {
            sources.push(user_config);
        }

        let project = working_dir.join(PROJECT_CONFIG_FILE);
        if project.exists() {
            sources.push(ConfigSource {
                config: Self::load_file(&project)?,
                path: project,
                precedence: 2,
            });
        }

        if let Some(explicit) = explicit_file {
            sources.push(ConfigSource {
                config: Self::load_file(explicit)?,
                path: explicit.to_path_buf(),
                precedence: 3,
            });
        }

        sources.sort_by_key(|s| s.precedence);
        for source in &sources {
            log::debug!("loaded configuration from {}", source.path.display());
        }
        Ok(sources)
    }

    fn load_user_config(user_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match user_dir {
            Some(dir) => dir.join("config.yaml"),
            None => match Self::user_config_path() {
                Some(path) => path,
                None => {
                    log::debug!("no home directory, skipping user configuration");
                    return Ok(None);
                }
            },
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// An empty file is an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }

    /// `~/.winpath/config.yaml`, if the home directory is known.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(".winpath").join("config.yaml"))
    }
}
