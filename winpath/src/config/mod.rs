//! Layered configuration for buffer sizing and extended-path handling.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`WINPATH_*`)
//! 3. An explicit file (via `ConfigBuilder::with_config_file`)
//! 4. `winpath.yaml` in the working directory
//! 5. User config (`~/.winpath/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use winpath::config::ConfigBuilder;
//!
//! let settings = ConfigBuilder::new().build().unwrap().settings();
//! println!("initial capacity: {}", settings.buffers.initial_capacity);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, PROJECT_CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{
    BufferConfig, BufferSettings, Config, ExtendedPathConfig, ExtendedPathSettings, Settings,
    DEFAULT_DOS_DEVICE_CAPACITY, DEFAULT_DOS_DEVICE_TABLE_CAPACITY, DEFAULT_INITIAL_CAPACITY,
    DEFAULT_MAX_POOLED_BUFFERS, DEFAULT_VOLUME_NAME_CAPACITY, DEFAULT_VOLUME_PATH_CAPACITY,
};
pub use validator::ConfigValidator;
