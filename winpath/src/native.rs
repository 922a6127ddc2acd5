//! OS-backed file management queries.
//!
//! [`NativeFileService`] answers the questions that need the operating
//! system: full paths as the OS resolves them, final paths through links,
//! environment variables and file attributes. Every call goes through the
//! buffer protocol of [`crate::buffer`].

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;

use crate::buffer::{BufferPool, Invocation};
use crate::config::Settings;
use crate::error::{translate, Error, NativeErrorCode, Result};
use crate::path::{
    add_extended_prefix, is_extended, native_length, remove_extended_prefix, CurrentDirectories,
    FileService,
};
use crate::platform::NativeTextQuery;

bitflags::bitflags! {
    /// File attributes as returned by `GetFileAttributesW`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct FileAttributes: u32 {
        /// Read-only file.
        const READ_ONLY = 0x0000_0001;
        /// Hidden file.
        const HIDDEN = 0x0000_0002;
        /// System file.
        const SYSTEM = 0x0000_0004;
        /// Directory.
        const DIRECTORY = 0x0000_0010;
        /// Marked for archiving.
        const ARCHIVE = 0x0000_0020;
        /// Device.
        const DEVICE = 0x0000_0040;
        /// No other attributes set.
        const NORMAL = 0x0000_0080;
        /// Temporary file.
        const TEMPORARY = 0x0000_0100;
        /// Sparse file.
        const SPARSE_FILE = 0x0000_0200;
        /// Symbolic link or other reparse point.
        const REPARSE_POINT = 0x0000_0400;
        /// Compressed.
        const COMPRESSED = 0x0000_0800;
        /// Data not immediately available.
        const OFFLINE = 0x0000_1000;
        /// Excluded from content indexing.
        const NOT_CONTENT_INDEXED = 0x0000_2000;
        /// Encrypted.
        const ENCRYPTED = 0x0000_4000;
        /// Integrity stream.
        const INTEGRITY_STREAM = 0x0000_8000;
    }
}

bitflags::bitflags! {
    /// Flags for `GetFinalPathNameByHandleW`.
    ///
    /// The name part (`FILE_NAME_NORMALIZED` or `FILE_NAME_OPENED`) and the
    /// volume part (`VOLUME_NAME_DOS`, `VOLUME_NAME_GUID`, `VOLUME_NAME_NT`
    /// or `VOLUME_NAME_NONE`) combine. The empty set means normalized DOS
    /// names.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct FinalPathFlags: u32 {
        /// Normalized name, the default.
        const FILE_NAME_NORMALIZED = 0x0;
        /// Name as opened.
        const FILE_NAME_OPENED = 0x8;
        /// Drive letter root, the default.
        const VOLUME_NAME_DOS = 0x0;
        /// Volume GUID root.
        const VOLUME_NAME_GUID = 0x1;
        /// NT device root.
        const VOLUME_NAME_NT = 0x2;
        /// No root.
        const VOLUME_NAME_NONE = 0x4;
    }
}

/// OS-backed implementation of [`FileService`] plus related queries.
pub struct NativeFileService<Q: ?Sized = dyn NativeTextQuery> {
    query: Arc<Q>,
    pool: Arc<BufferPool>,
    settings: Settings,
}

impl<Q: NativeTextQuery + ?Sized> NativeFileService<Q> {
    /// Create a service over `query`, sharing `pool` for buffers.
    pub fn new(query: Arc<Q>, pool: Arc<BufferPool>, settings: Settings) -> Self {
        Self {
            query,
            pool,
            settings,
        }
    }

    /// The settings in effect.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The full path of `path` as `GetFullPathNameW` resolves it.
    ///
    /// Paths longer than the configured legacy limit get the extended
    /// prefix for the call, when extended syntax is enabled, and lose it
    /// again in the result.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty path and the translated
    /// native error if the call fails.
    pub fn full_path_name(&self, path: &str) -> Result<String> {
        if path.is_empty() {
            return Err(Error::invalid_argument(path, "path is empty"));
        }

        let extended = &self.settings.extended_paths;
        let add_prefix = extended.utilize_extended_syntax
            && !is_extended(path)
            && native_length(path) > extended.legacy_max_path;
        let query_path = if add_prefix {
            add_extended_prefix(path, true)
        } else {
            Cow::Borrowed(path)
        };
        let added = query_path != path;

        let invocation = Invocation::new(self.settings.buffers.initial_capacity).subject(path);
        let result = self
            .pool
            .invoke_required(&*self.query, &invocation, |buffer| {
                self.query.full_path_name(&query_path, buffer)
            })?;

        if added {
            Ok(remove_extended_prefix(&result).into_owned())
        } else {
            Ok(result)
        }
    }

    /// The final path of `path` after following links, formatted per
    /// `flags`. With `resolve_links` unset the link itself is opened.
    ///
    /// # Errors
    ///
    /// Returns the translated native error, e.g. not found or access
    /// denied.
    pub fn final_path_name(
        &self,
        path: &str,
        flags: FinalPathFlags,
        resolve_links: bool,
    ) -> Result<String> {
        let invocation = Invocation::new(self.settings.buffers.initial_capacity).subject(path);
        self.pool
            .invoke_required(&*self.query, &invocation, |buffer| {
                self.query
                    .final_path_name(path, flags, resolve_links, buffer)
            })
    }

    /// The value of environment variable `name`, `None` if it is not set.
    ///
    /// # Errors
    ///
    /// Returns the translated native error for failures other than the
    /// variable being absent.
    pub fn environment_variable(&self, name: &str) -> Result<Option<String>> {
        let invocation = Invocation::new(self.settings.buffers.initial_capacity)
            .subject(name)
            .absent_when(|code| code == NativeErrorCode::ERROR_ENVVAR_NOT_FOUND);
        self.pool.invoke(&*self.query, &invocation, |buffer| {
            self.query.environment_variable(name, buffer)
        })
    }

    /// The attributes of `path`.
    ///
    /// # Errors
    ///
    /// Returns the translated native error if the attributes cannot be
    /// read.
    pub fn attributes(&self, path: &str) -> Result<FileAttributes> {
        match self.query.file_attributes(path) {
            Some(raw) => Ok(FileAttributes::from_bits_retain(raw)),
            None => Err(translate(self.query.last_error(), path)),
        }
    }

    /// Current-directory state as the OS holds it: `process_directory`
    /// plus the per-drive directories stored in the hidden `=X:`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `process_directory` is not fully
    /// qualified, or a native error from reading the variables.
    pub fn current_directories(&self, process_directory: &str) -> Result<CurrentDirectories> {
        let mut directories = CurrentDirectories::new(process_directory)?;
        for drive in 'A'..='Z' {
            if let Some(directory) = self.environment_variable(&format!("={drive}:"))? {
                if let Err(err) = directories.set_drive_directory(drive, directory) {
                    log::debug!("ignoring current directory of drive {drive}: {err}");
                }
            }
        }
        Ok(directories)
    }
}

impl<Q: NativeTextQuery + ?Sized> FileService for NativeFileService<Q> {
    fn full_path(&self, path: &str) -> Result<String> {
        self.full_path_name(path)
    }

    fn attributes(&self, path: &str) -> Result<FileAttributes> {
        NativeFileService::attributes(self, path)
    }
}

impl<Q: ?Sized> std::fmt::Debug for NativeFileService<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFileService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ScriptedCall, ScriptedPlatform};

    fn service(platform: ScriptedPlatform) -> NativeFileService<ScriptedPlatform> {
        NativeFileService::new(
            Arc::new(platform),
            Arc::new(BufferPool::new(2)),
            Settings::default(),
        )
    }

    #[test]
    fn test_full_path_name_uses_platform_current_directory() {
        let dirs = CurrentDirectories::new(r"D:\Temp").unwrap();
        let service = service(ScriptedPlatform::new().with_current_directories(dirs));
        assert_eq!(service.full_path_name(r"a\..\b").unwrap(), r"D:\Temp\b");
    }

    #[test]
    fn test_full_path_name_rejects_empty() {
        let service = service(ScriptedPlatform::new());
        assert!(service.full_path_name("").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_long_path_round_trips_through_extended_prefix() {
        let mut long = r"C:\".to_string();
        while long.len() <= 300 {
            long.push_str(r"segment\");
        }
        long.push_str("leaf");
        let platform = Arc::new(ScriptedPlatform::new());
        let service = NativeFileService::new(
            Arc::clone(&platform),
            Arc::new(BufferPool::new(2)),
            Settings::default(),
        );

        assert_eq!(service.full_path_name(&long).unwrap(), long);
        let seen = platform.last_full_path_query().unwrap();
        assert!(seen.starts_with(r"\\?\C:\"));
        assert!(platform.call_count(ScriptedCall::FullPathName) >= 2);
    }

    #[test]
    fn test_extended_syntax_can_be_disabled() {
        let mut long = r"C:\".to_string();
        long.push_str(&"x".repeat(400));
        let platform = Arc::new(ScriptedPlatform::new());
        let mut settings = Settings::default();
        settings.extended_paths.utilize_extended_syntax = false;
        let service =
            NativeFileService::new(Arc::clone(&platform), Arc::new(BufferPool::new(2)), settings);

        assert_eq!(service.full_path_name(&long).unwrap(), long);
        assert_eq!(platform.last_full_path_query().unwrap(), long);
    }

    #[test]
    fn test_environment_variable_absence() {
        let service = service(ScriptedPlatform::new().with_environment_variable("HOME", r"C:\h"));
        assert_eq!(
            service.environment_variable("home").unwrap().as_deref(),
            Some(r"C:\h")
        );
        assert_eq!(service.environment_variable("MISSING").unwrap(), None);
    }

    #[test]
    fn test_environment_variable_grows_buffer() {
        let value = "v".repeat(2000);
        let platform = Arc::new(ScriptedPlatform::new().with_environment_variable("BIG", &value));
        let service = NativeFileService::new(
            Arc::clone(&platform),
            Arc::new(BufferPool::new(2)),
            Settings::default(),
        );
        assert_eq!(service.environment_variable("BIG").unwrap(), Some(value));
        assert_eq!(platform.call_count(ScriptedCall::EnvironmentVariable), 2);
    }

    #[test]
    fn test_environment_variable_other_failures_surface() {
        let service = service(ScriptedPlatform::new().with_failure(
            ScriptedCall::EnvironmentVariable,
            NativeErrorCode::ERROR_ACCESS_DENIED,
        ));
        let err = service.environment_variable("PATH").unwrap_err();
        assert!(err.is_access_denied());
    }

    #[test]
    fn test_attributes() {
        let service = service(
            ScriptedPlatform::new().with_attributes(r"C:\Windows", FileAttributes::DIRECTORY),
        );
        assert_eq!(
            service.attributes(r"c:\windows\").unwrap(),
            FileAttributes::DIRECTORY
        );
        let err = service.attributes(r"C:\missing").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.code(), Some(NativeErrorCode::ERROR_FILE_NOT_FOUND));
    }

    #[test]
    fn test_final_path_name_follows_link() {
        let service = service(
            ScriptedPlatform::new()
                .with_attributes(r"C:\target", FileAttributes::DIRECTORY)
                .with_final_path(r"C:\link", r"C:\target"),
        );
        assert_eq!(
            service
                .final_path_name(r"C:\link", FinalPathFlags::empty(), true)
                .unwrap(),
            r"\\?\C:\target"
        );
        assert_eq!(
            service
                .final_path_name(r"C:\link", FinalPathFlags::VOLUME_NAME_NONE, true)
                .unwrap(),
            r"\target"
        );
        assert_eq!(
            service
                .final_path_name(r"C:\link", FinalPathFlags::empty(), false)
                .unwrap(),
            r"\\?\C:\link"
        );
    }

    #[test]
    fn test_final_path_name_privilege_failure() {
        let service = service(ScriptedPlatform::new().with_failure(
            ScriptedCall::FinalPathName,
            NativeErrorCode::ERROR_PRIVILEGE_NOT_HELD,
        ));
        let err = service
            .final_path_name(r"C:\link", FinalPathFlags::empty(), true)
            .unwrap_err();
        assert!(err.is_access_denied());
        assert_eq!(err.code(), Some(NativeErrorCode::ERROR_PRIVILEGE_NOT_HELD));
    }

    #[test]
    fn test_current_directories_reads_drive_variables() {
        let service = service(
            ScriptedPlatform::new()
                .with_environment_variable("=C:", r"C:\Users")
                .with_environment_variable("=E:", "garbage"),
        );
        let dirs = service.current_directories(r"D:\Temp").unwrap();
        assert_eq!(dirs.drive_directory('C'), Some(r"C:\Users"));
        assert_eq!(dirs.drive_directory('E'), None);
        assert_eq!(crate::path::full_path("C:", &dirs).unwrap(), r"C:\Users");
    }
}
