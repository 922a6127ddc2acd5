//! Volume resolution: mount points, volume identities and drive letters.
//!
//! [`VolumeResolver`] answers read-only questions about the volumes behind
//! paths. Every query is a native call made through the buffer protocol,
//! so failures arrive as structured errors carrying the native code.
//!
//! # Canonical roots
//!
//! The same volume can be reached through several roots: a drive letter,
//! a folder mount point, or its `\\?\Volume{GUID}\` name. The canonical
//! root is the volume name for local volumes and the two-slash
//! `\\server\share\` form for network shares, so two paths are on the same
//! volume exactly when their canonical roots are equal.

mod types;

use std::sync::Arc;

pub use types::{FileSystemFeatures, RawVolumeInformation, VolumeInformation};

use crate::buffer::{split_multi_string, BufferPool, Invocation};
use crate::config::BufferSettings;
use crate::error::{translate, Error, Result};
use crate::path::{
    add_trailing_separator, canonicalize, classify, is_separator, PathFormat,
    EXTENDED_UNC_PREFIX, LEGACY_MAX_PATH, UNC_PREFIX,
};
use crate::platform::NativeTextQuery;

/// Resolves volume identities through a [`NativeTextQuery`].
pub struct VolumeResolver<Q: ?Sized = dyn NativeTextQuery> {
    query: Arc<Q>,
    pool: Arc<BufferPool>,
    buffers: BufferSettings,
}

impl<Q: NativeTextQuery + ?Sized> VolumeResolver<Q> {
    /// Create a resolver over `query`, sharing `pool` for buffers.
    pub fn new(query: Arc<Q>, pool: Arc<BufferPool>, buffers: BufferSettings) -> Self {
        Self {
            query,
            pool,
            buffers,
        }
    }

    /// The canonical root of the volume `path` lives on.
    ///
    /// UNC paths, extended or not and whatever their slash count, yield
    /// `\\server\share\`. Drive and extended volume paths yield the volume
    /// name, e.g. `\\?\Volume{GUID}\`. Device paths yield their root.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for relative, empty or unrecognized paths
    /// and the translated native error if the volume name query fails.
    pub fn canonical_root(&self, path: &str) -> Result<String> {
        let parsed = classify(path);
        if path.is_empty() || parsed.is_relative || parsed.format == PathFormat::UnknownFormat {
            return Err(Error::invalid_argument(
                path,
                "canonical root requires an absolute path",
            ));
        }

        let canonical = canonicalize(path);
        let parsed = classify(&canonical);
        let root = parsed.root(&canonical);
        let canonical_root = match parsed.format {
            PathFormat::UniformNamingConvention => {
                format!("{UNC_PREFIX}{}", root.trim_start_matches(is_separator))
            }
            PathFormat::UniformNamingConventionExtended => {
                format!("{UNC_PREFIX}{}", &root[EXTENDED_UNC_PREFIX.len()..])
            }
            PathFormat::DriveAbsolute | PathFormat::VolumeAbsoluteExtended => {
                return self.volume_name(root);
            }
            PathFormat::Device => root.to_string(),
            PathFormat::Relative | PathFormat::DriveRelative | PathFormat::UnknownFormat => {
                return Err(Error::invalid_argument(
                    path,
                    format!("no root in canonical form '{canonical}'"),
                ));
            }
        };
        Ok(add_trailing_separator(&canonical_root).into_owned())
    }

    /// The mount point `path` lives under, e.g. `C:\` or `C:\mnt\data\`.
    ///
    /// # Errors
    ///
    /// Returns the translated native error.
    pub fn mount_point(&self, path: &str) -> Result<String> {
        let invocation = Invocation::new(self.buffers.volume_path_capacity).subject(path);
        self.pool
            .invoke_required(&*self.query, &invocation, |buffer| {
                self.query.volume_path_name(path, buffer)
            })
    }

    /// The `\\?\Volume{GUID}\` name of the volume mounted at
    /// `mount_point`. A trailing separator is added if missing.
    ///
    /// # Errors
    ///
    /// Returns the translated native error, e.g. when `mount_point` is not
    /// a mount point.
    pub fn volume_name(&self, mount_point: &str) -> Result<String> {
        let mount_point = add_trailing_separator(mount_point);
        let invocation =
            Invocation::new(self.buffers.volume_name_capacity).subject(&mount_point);
        self.pool
            .invoke_required(&*self.query, &invocation, |buffer| {
                self.query.volume_name_for_mount_point(&mount_point, buffer)
            })
    }

    /// Every path the volume `volume_name` is mounted at.
    ///
    /// # Errors
    ///
    /// Returns the translated native error.
    pub fn volume_mount_points(&self, volume_name: &str) -> Result<Vec<String>> {
        let invocation =
            Invocation::new(self.buffers.initial_capacity).subject(volume_name);
        let names = self
            .pool
            .invoke_required(&*self.query, &invocation, |buffer| {
                self.query.volume_path_names(volume_name, buffer)
            })?;
        Ok(split_multi_string(&names))
    }

    /// The logical drive roots, e.g. `["C:\", "D:\"]`.
    ///
    /// # Errors
    ///
    /// Returns the translated native error.
    pub fn logical_drive_strings(&self) -> Result<Vec<String>> {
        let invocation = Invocation::new(self.buffers.initial_capacity).subject("logical drives");
        let drives = self
            .pool
            .invoke_required(&*self.query, &invocation, |buffer| {
                self.query.logical_drive_strings(buffer)
            })?;
        Ok(split_multi_string(&drives))
    }

    /// The targets of DOS device `alias`, or every alias when `None`.
    ///
    /// Trailing separators are removed from the alias (`C:\` asks for
    /// `C:`). The whole table starts from a much larger buffer.
    ///
    /// # Errors
    ///
    /// Returns the translated native error, e.g. `NotFound` for an
    /// unknown alias.
    pub fn query_dos_device_names(&self, alias: Option<&str>) -> Result<Vec<String>> {
        let alias = alias.map(|alias| alias.trim_end_matches(is_separator));
        let (capacity, subject) = match alias {
            Some(alias) => (self.buffers.dos_device_capacity, alias),
            None => (self.buffers.dos_device_table_capacity, "DOS device table"),
        };
        let invocation = Invocation::new(capacity).subject(subject);
        let names = self
            .pool
            .invoke_required(&*self.query, &invocation, |buffer| {
                self.query.query_dos_device(alias, buffer)
            })?;
        Ok(split_multi_string(&names))
    }

    /// Label, serial number, limits and features of the volume at
    /// `root_path`. A trailing separator is added if missing.
    ///
    /// # Errors
    ///
    /// Returns the translated native error if the root does not exist.
    pub fn volume_information(&self, root_path: &str) -> Result<VolumeInformation> {
        let root = add_trailing_separator(root_path).into_owned();
        let mut volume_name = self.pool.acquire(LEGACY_MAX_PATH + 1);
        let mut file_system_name = self.pool.acquire(LEGACY_MAX_PATH + 1);

        let Some(raw) =
            self.query
                .volume_information(&root, &mut volume_name, &mut file_system_name)
        else {
            return Err(translate(self.query.last_error(), root));
        };

        volume_name.set_length_to_first_null();
        file_system_name.set_length_to_first_null();
        Ok(VolumeInformation {
            volume_name: volume_name.to_string_lossy(),
            volume_serial_number: raw.serial_number,
            maximum_component_length: raw.maximum_component_length,
            file_system_flags: FileSystemFeatures::from_bits_retain(raw.file_system_flags),
            file_system_name: file_system_name.to_string_lossy(),
            root_path_name: root,
        })
    }

    /// The logical drive whose canonical root equals that of `path`, or
    /// `None` if no drive maps to the same volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the canonical root of `path` or of any scanned
    /// drive cannot be resolved.
    pub fn drive_letter(&self, path: &str) -> Result<Option<String>> {
        let target = self.canonical_root(path)?;
        for drive in self.logical_drive_strings()? {
            let drive_root = self.canonical_root(&drive)?;
            log::trace!("drive {drive} has canonical root {drive_root}");
            if drive_root == target {
                return Ok(Some(drive));
            }
        }
        log::debug!("no drive letter maps to {target}");
        Ok(None)
    }
}

impl<Q: ?Sized> std::fmt::Debug for VolumeResolver<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeResolver")
            .field("buffers", &self.buffers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NativeErrorCode;
    use crate::platform::{ScriptedCall, ScriptedPlatform, ScriptedVolume};

    const SYSTEM: &str = r"\\?\Volume{00000000-0000-0000-0000-00000000000c}\";
    const DATA: &str = r"\\?\Volume{00000000-0000-0000-0000-00000000000d}\";
    const USB: &str = r"\\?\Volume{00000000-0000-0000-0000-0000000000ff}\";

    fn platform() -> ScriptedPlatform {
        ScriptedPlatform::new()
            .with_volume(SYSTEM, ScriptedVolume::ntfs("System", 0xC0FF_EE00))
            .with_volume(DATA, ScriptedVolume::ntfs("Data", 0xDA7A))
            .with_volume(
                USB,
                ScriptedVolume::ntfs("STICK", 0x55).with_file_system(
                    "FAT32",
                    FileSystemFeatures::CASE_PRESERVED_NAMES | FileSystemFeatures::UNICODE_ON_DISK,
                ),
            )
            .with_mount(r"C:\", SYSTEM)
            .with_mount(r"D:\", DATA)
            .with_mount(r"C:\mnt\data\", DATA)
            .with_mount(r"C:\mnt\usb\", USB)
            .with_dos_device("COM1", &[r"\Device\Serial0"])
    }

    fn resolver(platform: ScriptedPlatform) -> VolumeResolver<ScriptedPlatform> {
        VolumeResolver::new(
            Arc::new(platform),
            Arc::new(BufferPool::new(2)),
            BufferSettings::default(),
        )
    }

    #[test]
    fn test_canonical_root_rejects_relative_paths() {
        let resolver = resolver(platform());
        for path in ["", "a", r"a\b", "C:", "C:a", r"\a", "."] {
            let err = resolver.canonical_root(path).unwrap_err();
            assert!(err.is_invalid_argument(), "{path:?}: {err}");
        }
    }

    #[test]
    fn test_canonical_root_rejects_unknown_format() {
        let resolver = resolver(platform());
        assert!(resolver
            .canonical_root(r"\\?\")
            .unwrap_err()
            .is_invalid_argument());
        assert!(resolver
            .canonical_root(r"\\")
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_canonical_root_of_unc_forms() {
        let resolver = resolver(platform());
        for path in [
            r"\\server\share",
            r"\\server\share\dir\file",
            "//server/share/dir",
            r"\\?\UNC\server\share\dir",
        ] {
            assert_eq!(
                resolver.canonical_root(path).unwrap(),
                r"\\server\share\",
                "{path:?}"
            );
        }
    }

    #[test]
    fn test_canonical_root_of_drive_is_volume_name() {
        let resolver = resolver(platform());
        assert_eq!(resolver.canonical_root(r"C:\Windows").unwrap(), SYSTEM);
        assert_eq!(resolver.canonical_root(r"d:\x\..\y").unwrap(), DATA);
        assert_eq!(resolver.canonical_root(r"\\?\C:\Windows").unwrap(), SYSTEM);
        assert_eq!(resolver.canonical_root(&format!("{DATA}dir")).unwrap(), DATA);
    }

    #[test]
    fn test_canonical_root_of_device() {
        let resolver = resolver(platform());
        assert_eq!(resolver.canonical_root(r"\\.\COM1").unwrap(), r"\\.\COM1\");
        assert_eq!(resolver.canonical_root("LPT1").unwrap(), r"\\.\LPT1\");
    }

    #[test]
    fn test_canonical_root_unknown_drive_fails() {
        let resolver = resolver(platform());
        let err = resolver.canonical_root(r"Q:\x").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.code(), Some(NativeErrorCode::ERROR_PATH_NOT_FOUND));
    }

    #[test]
    fn test_mount_point() {
        let resolver = resolver(platform());
        assert_eq!(resolver.mount_point(r"C:\Windows\System32").unwrap(), r"C:\");
        assert_eq!(
            resolver.mount_point(r"C:\mnt\data\projects\x").unwrap(),
            r"C:\mnt\data\"
        );
        assert_eq!(
            resolver.mount_point(r"\\server\share\dir").unwrap(),
            r"\\server\share\"
        );
    }

    #[test]
    fn test_mount_point_grows_past_small_capacity() {
        let platform = Arc::new(platform());
        let resolver = VolumeResolver::new(
            Arc::clone(&platform),
            Arc::new(BufferPool::new(2)),
            BufferSettings {
                volume_path_capacity: 4,
                ..BufferSettings::default()
            },
        );
        assert_eq!(
            resolver.mount_point(r"C:\mnt\usb\photos").unwrap(),
            r"C:\mnt\usb\"
        );
        assert_eq!(platform.call_count(ScriptedCall::VolumePathName), 3);
    }

    #[test]
    fn test_volume_mount_points() {
        let resolver = resolver(platform());
        assert_eq!(
            resolver.volume_mount_points(DATA).unwrap(),
            vec![r"C:\mnt\data\".to_string(), r"D:\".to_string()]
        );
        assert!(resolver.volume_mount_points(r"\\?\Volume{nope}\").is_err());
    }

    #[test]
    fn test_mount_points_of_unmounted_volume_is_empty() {
        let lonely = r"\\?\Volume{00000000-0000-0000-0000-000000000042}\";
        let resolver = resolver(platform().with_volume(lonely, ScriptedVolume::ntfs("", 1)));
        assert!(resolver.volume_mount_points(lonely).unwrap().is_empty());
    }

    #[test]
    fn test_logical_drive_strings() {
        let resolver = resolver(platform());
        assert_eq!(
            resolver.logical_drive_strings().unwrap(),
            vec![r"C:\".to_string(), r"D:\".to_string()]
        );
    }

    #[test]
    fn test_query_dos_device_names() {
        let resolver = resolver(platform());
        assert_eq!(
            resolver.query_dos_device_names(Some("com1")).unwrap(),
            vec![r"\Device\Serial0".to_string()]
        );
        assert_eq!(
            resolver.query_dos_device_names(Some(r"C:\")).unwrap(),
            vec![r"\Device\HarddiskVolume1".to_string()]
        );
        let table = resolver.query_dos_device_names(None).unwrap();
        assert!(table.contains(&"COM1".to_string()));
        assert!(table.contains(&"C:".to_string()));
        assert!(table.contains(&"D:".to_string()));

        let err = resolver.query_dos_device_names(Some("NOPE")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_dos_device_table_retries_on_insufficient_buffer() {
        let platform = Arc::new(platform());
        let resolver = VolumeResolver::new(
            Arc::clone(&platform),
            Arc::new(BufferPool::new(2)),
            BufferSettings {
                dos_device_table_capacity: 2,
                ..BufferSettings::default()
            },
        );
        assert_eq!(resolver.query_dos_device_names(None).unwrap().len(), 3);
        assert!(platform.call_count(ScriptedCall::QueryDosDevice) > 1);
    }

    #[test]
    fn test_volume_information() {
        let resolver = resolver(platform());
        let info = resolver.volume_information("C:").unwrap();
        assert_eq!(info.root_path_name, r"C:\");
        assert_eq!(info.volume_name, "System");
        assert_eq!(info.volume_serial_number, 0xC0FF_EE00);
        assert_eq!(info.maximum_component_length, 255);
        assert_eq!(info.file_system_name, "NTFS");
        assert!(info
            .file_system_flags
            .contains(FileSystemFeatures::PERSISTENT_ACLS));

        let usb = resolver.volume_information(r"C:\mnt\usb\").unwrap();
        assert_eq!(usb.file_system_name, "FAT32");
        assert!(!usb
            .file_system_flags
            .contains(FileSystemFeatures::PERSISTENT_ACLS));
    }

    #[test]
    fn test_volume_information_missing_root() {
        let resolver = resolver(platform());
        let err = resolver.volume_information(r"Q:\").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_drive_letter() {
        let resolver = resolver(platform());
        assert_eq!(
            resolver.drive_letter(r"C:\mnt\data\file").unwrap().as_deref(),
            Some(r"C:\")
        );
        assert_eq!(
            resolver.drive_letter(&format!("{DATA}file")).unwrap().as_deref(),
            Some(r"D:\")
        );
    }

    #[test]
    fn test_drive_letter_no_match_is_not_an_error() {
        let resolver = resolver(platform());
        assert_eq!(resolver.drive_letter(USB).unwrap(), None);
        assert_eq!(resolver.drive_letter(r"\\server\share").unwrap(), None);
    }

    #[test]
    fn test_drive_letter_propagates_failures() {
        let resolver = resolver(platform().with_failure(
            ScriptedCall::LogicalDriveStrings,
            NativeErrorCode::ERROR_ACCESS_DENIED,
        ));
        assert!(resolver
            .drive_letter(r"C:\x")
            .unwrap_err()
            .is_access_denied());
    }

    #[test]
    fn test_relative_drive_letter_is_invalid() {
        let resolver = resolver(platform());
        assert!(resolver
            .drive_letter("relative")
            .unwrap_err()
            .is_invalid_argument());
    }
}
