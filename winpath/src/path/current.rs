//! Current-directory tracking on top of a [`FileService`].

use super::classify::classify;
use super::full_path::{full_path, CurrentDirectories};
use super::types::PathFormat;
use crate::error::{Error, Result};
use crate::native::FileAttributes;

/// The file system questions current-directory tracking depends on.
#[cfg_attr(test, mockall::automock)]
pub trait FileService {
    /// Fully qualify `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved.
    fn full_path(&self, path: &str) -> Result<String>;

    /// The attributes of an existing file or directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the attributes cannot be read, e.g. because the
    /// path does not exist.
    fn attributes(&self, path: &str) -> Result<FileAttributes>;
}

/// Tracks the process and per-drive current directories.
///
/// Changes are validated through the [`FileService`]: the target must be
/// an existing directory. Resolution of relative paths against the
/// tracked state is pure, see [`full_path`].
#[derive(Debug)]
pub struct CurrentDirectory<F> {
    file_service: F,
    directories: CurrentDirectories,
}

impl<F: FileService> CurrentDirectory<F> {
    /// Start tracking at `initial`, which must be an existing directory.
    ///
    /// # Errors
    ///
    /// Same as [`set_current_directory`](Self::set_current_directory).
    pub fn new(file_service: F, initial: &str) -> Result<Self> {
        let directory = validate_directory(&file_service, initial)?;
        Ok(Self {
            file_service,
            directories: CurrentDirectories::new(directory)?,
        })
    }

    /// Make `path` the current directory, and the current directory of its
    /// drive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `path` is relative or not a directory,
    /// or the file service's error if it cannot be resolved.
    pub fn set_current_directory(&mut self, path: &str) -> Result<()> {
        let directory = validate_directory(&self.file_service, path)?;
        log::debug!("current directory is now '{directory}'");
        self.directories.set_process_directory(directory)
    }

    /// The process current directory.
    #[must_use]
    pub fn current_directory(&self) -> &str {
        self.directories.process_directory()
    }

    /// Snapshot of the tracked state.
    #[must_use]
    pub fn current_directories(&self) -> &CurrentDirectories {
        &self.directories
    }

    /// Resolve `path` against the tracked state.
    ///
    /// # Errors
    ///
    /// See [`full_path`].
    pub fn full_path(&self, path: &str) -> Result<String> {
        full_path(path, &self.directories)
    }

    /// The underlying file service.
    pub fn file_service(&self) -> &F {
        &self.file_service
    }
}

fn validate_directory<F: FileService + ?Sized>(file_service: &F, path: &str) -> Result<String> {
    let parsed = classify(path);
    if path.is_empty() || parsed.is_relative || parsed.format == PathFormat::UnknownFormat {
        return Err(Error::invalid_argument(
            path,
            "current directory must be an absolute path",
        ));
    }

    let full = file_service.full_path(path)?;
    let attributes = file_service.attributes(&full)?;
    if !attributes.contains(FileAttributes::DIRECTORY) {
        return Err(Error::invalid_argument(full, "not a directory"));
    }
    Ok(full)
}
