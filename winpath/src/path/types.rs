//! Core types for path classification.

use std::fmt;

use serde::Serialize;

/// Primary directory separator.
pub const SEPARATOR: char = '\\';

/// Alternate directory separator, accepted on input.
pub const ALT_SEPARATOR: char = '/';

/// The `\\?\` prefix that disables string processing in the OS path
/// parser.
pub const EXTENDED_PREFIX: &str = r"\\?\";

/// The `\\?\UNC\` prefix for extended network paths.
pub const EXTENDED_UNC_PREFIX: &str = r"\\?\UNC\";

/// The `\\.\` device namespace prefix.
pub const DEVICE_PREFIX: &str = r"\\.\";

/// Plain UNC prefix.
pub const UNC_PREFIX: &str = r"\\";

/// Legacy `MAX_PATH`, the terminating NUL included.
pub const LEGACY_MAX_PATH: usize = 260;

/// Longest path the OS accepts with the extended prefix.
pub const MAX_LONG_PATH: usize = 32_767;

/// Legacy device names that address a device in any directory.
pub const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Check whether `c` is either separator.
#[must_use]
pub fn is_separator(c: char) -> bool {
    c == SEPARATOR || c == ALT_SEPARATOR
}

pub(crate) fn is_separator_byte(b: u8) -> bool {
    b == b'\\' || b == b'/'
}

/// Length of a path in UTF-16 code units, the unit native limits use.
#[must_use]
pub fn native_length(path: &str) -> usize {
    path.encode_utf16().count()
}

/// Structural format of a path string.
///
/// # Examples
///
/// ```
/// use winpath::path::{classify, PathFormat};
///
/// assert_eq!(classify(r"C:\Windows").format, PathFormat::DriveAbsolute);
/// assert_eq!(classify(r"\\server\share").format, PathFormat::UniformNamingConvention);
/// assert_eq!(classify("notes.txt").format, PathFormat::Relative);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PathFormat {
    /// Relative to the current directory, or rooted on the current drive
    /// (`foo`, `\foo`).
    Relative,
    /// `X:\...`
    DriveAbsolute,
    /// `X:foo`, relative to the current directory of drive `X`.
    DriveRelative,
    /// `\\server\share\...`
    UniformNamingConvention,
    /// `\\?\UNC\server\share\...`
    UniformNamingConventionExtended,
    /// `\\?\X:\...` or `\\?\Volume{GUID}\...`
    VolumeAbsoluteExtended,
    /// `\\.\name`, `\\?\name`, or a reserved device name.
    Device,
    /// Anything the OS would not accept as a path.
    UnknownFormat,
}

impl PathFormat {
    /// Short lowercase name, used by the CLI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::DriveAbsolute => "drive-absolute",
            Self::DriveRelative => "drive-relative",
            Self::UniformNamingConvention => "unc",
            Self::UniformNamingConventionExtended => "unc-extended",
            Self::VolumeAbsoluteExtended => "volume-absolute-extended",
            Self::Device => "device",
            Self::UnknownFormat => "unknown",
        }
    }

    /// Whether the format carries the `\\?\` prefix.
    #[must_use]
    pub fn is_extended(self) -> bool {
        matches!(
            self,
            Self::UniformNamingConventionExtended | Self::VolumeAbsoluteExtended
        )
    }
}

impl fmt::Display for PathFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of classifying a path.
///
/// `root_length` is a byte offset into the classified string and never
/// exceeds its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ParsedPath {
    /// Structural format.
    pub format: PathFormat,
    /// Length of the root, in bytes.
    pub root_length: usize,
    /// Whether the path depends on a current directory.
    pub is_relative: bool,
    /// Whether the path addresses a device.
    pub is_device: bool,
}

impl ParsedPath {
    pub(crate) fn new(format: PathFormat, root_length: usize) -> Self {
        Self {
            format,
            root_length,
            is_relative: matches!(format, PathFormat::Relative | PathFormat::DriveRelative),
            is_device: format == PathFormat::Device,
        }
    }

    /// The root portion of `path`, which must be the string this value was
    /// classified from.
    #[must_use]
    pub fn root<'a>(&self, path: &'a str) -> &'a str {
        path.get(..self.root_length).unwrap_or(path)
    }
}
