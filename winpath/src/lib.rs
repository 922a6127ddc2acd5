#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # winpath
//!
//! Windows path classification, canonicalization and volume resolution.
//!
//! The pure half of the crate works on any target: it classifies path
//! strings, canonicalizes them the way the Win32 path normalizer does, and
//! adds or removes the `\\?\` extended prefix. The native half resolves
//! full paths, final paths, mount points, volume names and DOS device
//! aliases through a [`platform::NativeTextQuery`] binding, with every
//! variable-length result fetched by the buffer protocol of [`buffer`].
//!
//! ## Core Types
//!
//! - [`PathFormat`] and [`ParsedPath`]: path classification
//! - [`VolumeResolver`] and [`VolumeInformation`]: volume queries
//! - [`NativeFileService`]: OS-backed full path, final path, environment
//!   and attribute queries
//! - [`Error`], [`Result`] and [`NativeErrorCode`]: error handling
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use winpath::{canonicalize, classify, PathFormat};
//!
//! let parsed = classify(r"\\server\share\dir");
//! assert_eq!(parsed.format, PathFormat::UniformNamingConvention);
//!
//! assert_eq!(canonicalize(r"C:\a\.\b\..\c. "), r"C:\a\c");
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod logging;
pub mod native;
pub mod path;
pub mod platform;
pub mod volume;

// Re-export key types at crate root for convenience
pub use buffer::{BufferPool, Invocation, NativeBuffer};
pub use config::{Config, ConfigBuilder, Settings};
pub use error::{translate, Error, ErrorClass, NativeErrorCode, NativeErrorSource, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use native::{FileAttributes, FinalPathFlags, NativeFileService};
pub use path::{
    add_extended_prefix, canonicalize, classify, full_path, remove_extended_prefix,
    CurrentDirectories, CurrentDirectory, FileService, ParsedPath, PathFormat,
};
pub use platform::NativeTextQuery;
pub use volume::{FileSystemFeatures, VolumeInformation, VolumeResolver};
