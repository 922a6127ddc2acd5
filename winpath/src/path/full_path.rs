//! Full-path resolution against explicit current-directory state.
//!
//! The OS resolves drive-relative paths such as `C:foo` against a hidden
//! per-drive current directory (the `=C:` environment variables). Here
//! that state is a plain value, [`CurrentDirectories`], passed in by the
//! caller.

use std::collections::BTreeMap;

use super::canonicalize::canonicalize;
use super::classify::{classify, reserved_device_name};
use super::separators::combine;
use super::types::PathFormat;
use crate::error::{Error, Result};

/// The process current directory plus the current directory of each
/// drive.
///
/// # Examples
///
/// ```
/// use winpath::path::CurrentDirectories;
///
/// let dirs = CurrentDirectories::new(r"D:\Temp")
///     .unwrap()
///     .with_drive_directory('c', r"C:\Users")
///     .unwrap();
/// assert_eq!(dirs.process_directory(), r"D:\Temp");
/// assert_eq!(dirs.directory_for_drive('C'), r"C:\Users");
/// assert_eq!(dirs.directory_for_drive('d'), r"D:\Temp");
/// assert_eq!(dirs.directory_for_drive('E'), r"E:\");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentDirectories {
    process: String,
    drives: BTreeMap<char, String>,
}

impl CurrentDirectories {
    /// Create state with the given process current directory.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `process_directory` is not fully
    /// qualified.
    pub fn new(process_directory: impl Into<String>) -> Result<Self> {
        let process = process_directory.into();
        require_fully_qualified(&process)?;
        let mut dirs = Self {
            process: String::new(),
            drives: BTreeMap::new(),
        };
        dirs.set_process_directory(process)?;
        Ok(dirs)
    }

    /// Builder form of [`set_drive_directory`](Self::set_drive_directory).
    ///
    /// # Errors
    ///
    /// See [`set_drive_directory`](Self::set_drive_directory).
    pub fn with_drive_directory(
        mut self,
        drive: char,
        directory: impl Into<String>,
    ) -> Result<Self> {
        self.set_drive_directory(drive, directory)?;
        Ok(self)
    }

    /// Change the process current directory. A drive-absolute directory is
    /// also recorded as the current directory of its drive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `directory` is not fully qualified.
    pub fn set_process_directory(&mut self, directory: impl Into<String>) -> Result<()> {
        let directory = directory.into();
        require_fully_qualified(&directory)?;
        if let Some(drive) = drive_letter(&directory) {
            self.drives.insert(drive, directory.clone());
        }
        self.process = directory;
        Ok(())
    }

    /// Record the current directory of `drive`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `drive` is not a letter or `directory`
    /// is not a drive-absolute path on that drive.
    pub fn set_drive_directory(&mut self, drive: char, directory: impl Into<String>) -> Result<()> {
        let directory = directory.into();
        if !drive.is_ascii_alphabetic() {
            return Err(Error::invalid_argument(
                drive.to_string(),
                "drive must be a letter",
            ));
        }
        let drive = drive.to_ascii_uppercase();
        if drive_letter(&directory) != Some(drive) {
            return Err(Error::invalid_argument(
                directory,
                format!("not an absolute path on drive {drive}:"),
            ));
        }
        self.drives.insert(drive, directory);
        Ok(())
    }

    /// The process current directory.
    #[must_use]
    pub fn process_directory(&self) -> &str {
        &self.process
    }

    /// The recorded current directory of `drive`, if any.
    #[must_use]
    pub fn drive_directory(&self, drive: char) -> Option<&str> {
        self.drives
            .get(&drive.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// The directory a drive-relative path on `drive` resolves against:
    /// the process directory if it is on that drive, else the recorded
    /// directory, else the drive root.
    #[must_use]
    pub fn directory_for_drive(&self, drive: char) -> String {
        let upper = drive.to_ascii_uppercase();
        if drive_letter(&self.process) == Some(upper) {
            return self.process.clone();
        }
        self.drive_directory(upper)
            .map_or_else(|| format!("{drive}:\\"), str::to_string)
    }

    /// Iterate over the recorded per-drive directories.
    pub fn drives(&self) -> impl Iterator<Item = (char, &str)> {
        self.drives.iter().map(|(drive, dir)| (*drive, dir.as_str()))
    }
}

impl Default for CurrentDirectories {
    /// `C:\` as the process directory.
    fn default() -> Self {
        let root = r"C:\".to_string();
        Self {
            drives: BTreeMap::from([('C', root.clone())]),
            process: root,
        }
    }
}

/// Resolve `path` to a fully qualified canonical path.
///
/// Relative paths are joined to the process directory, rooted paths
/// (`\foo`) to its root and drive-relative paths (`C:foo`) to the
/// directory of their drive. The result is then canonicalized. Reserved
/// device names resolve to `\\.\NAME` whatever the current directory.
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty path.
///
/// # Examples
///
/// ```
/// use winpath::path::{full_path, CurrentDirectories};
///
/// let dirs = CurrentDirectories::new(r"D:\Temp")
///     .unwrap()
///     .with_drive_directory('C', r"C:\Users")
///     .unwrap();
///
/// assert_eq!(full_path("C:", &dirs).unwrap(), r"C:\Users");
/// assert_eq!(full_path("C", &dirs).unwrap(), r"D:\Temp\C");
/// assert_eq!(full_path(r"E:foo", &dirs).unwrap(), r"E:\foo");
/// assert_eq!(full_path(r"\Windows", &dirs).unwrap(), r"D:\Windows");
/// assert_eq!(full_path("LPT1", &dirs).unwrap(), r"\\.\LPT1");
/// assert!(full_path("", &dirs).is_err());
/// ```
pub fn full_path(path: &str, directories: &CurrentDirectories) -> Result<String> {
    if path.is_empty() {
        return Err(Error::invalid_argument(path, "path is empty"));
    }
    if reserved_device_name(path).is_some() {
        return Ok(canonicalize(path));
    }

    let parsed = classify(path);
    let combined = match parsed.format {
        PathFormat::Relative if parsed.root_length == 1 => {
            let process = directories.process_directory();
            let root = classify(process).root(process);
            format!("{}{path}", root.trim_end_matches(['\\', '/']))
        }
        PathFormat::Relative => combine(directories.process_directory(), path),
        PathFormat::DriveRelative => {
            let drive = path.chars().next().unwrap_or_default();
            combine(&directories.directory_for_drive(drive), &path[2..])
        }
        _ => path.to_string(),
    };

    log::trace!("full path of '{path}' is built from '{combined}'");
    Ok(canonicalize(&combined))
}

fn require_fully_qualified(path: &str) -> Result<()> {
    let parsed = classify(path);
    if parsed.is_relative || parsed.format == PathFormat::UnknownFormat {
        return Err(Error::invalid_argument(
            path,
            "current directory must be fully qualified",
        ));
    }
    Ok(())
}

fn drive_letter(path: &str) -> Option<char> {
    let parsed = classify(path);
    if parsed.format != PathFormat::DriveAbsolute {
        return None;
    }
    path.chars().next().map(|c| c.to_ascii_uppercase())
}
