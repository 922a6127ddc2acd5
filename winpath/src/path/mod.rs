//! Windows path strings: classification, canonicalization and resolution.
//!
//! Everything in this module is pure string processing. Nothing here
//! touches the file system or reads process state; current directories
//! are passed in explicitly as [`CurrentDirectories`].
//!
//! # Formats
//!
//! [`classify`] recognises drive paths (`C:\x`, `C:x`), UNC paths
//! (`\\server\share`), the extended forms (`\\?\C:\x`,
//! `\\?\UNC\server\share`, `\\?\Volume{..}\`), device paths (`\\.\COM1`)
//! and bare reserved device names (`CON`, `LPT1`).
//!
//! # Examples
//!
//! ```
//! use winpath::path::{canonicalize, classify, PathFormat};
//!
//! let parsed = classify(r"\\server\share\dir");
//! assert_eq!(parsed.format, PathFormat::UniformNamingConvention);
//! assert_eq!(parsed.root_length, 15);
//!
//! assert_eq!(canonicalize(r"C:/Users/./me/../you"), r"C:\Users\you");
//! ```

pub mod canonicalize;
pub mod classify;
pub mod current;
pub mod extended;
pub mod full_path;
pub mod separators;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use canonicalize::canonicalize;
pub use classify::{classify, get_root, is_device, is_extended, is_relative, reserved_device_name};
pub use current::{CurrentDirectory, FileService};
pub use extended::{add_extended_prefix, remove_extended_prefix};
pub use full_path::{full_path, CurrentDirectories};
pub use separators::{
    add_trailing_separator, combine, ends_with_separator, remove_trailing_separators,
    replace_root,
};
pub use types::{
    is_separator, native_length, ParsedPath, PathFormat, ALT_SEPARATOR, DEVICE_PREFIX,
    EXTENDED_PREFIX, EXTENDED_UNC_PREFIX, LEGACY_MAX_PATH, MAX_LONG_PATH, RESERVED_DEVICE_NAMES,
    SEPARATOR, UNC_PREFIX,
};
