//! Volume information records.

use serde::Serialize;

bitflags::bitflags! {
    /// File system features reported by `GetVolumeInformationW`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct FileSystemFeatures: u32 {
        /// File names are case-sensitive.
        const CASE_SENSITIVE_SEARCH = 0x0000_0001;
        /// The case of file names is preserved.
        const CASE_PRESERVED_NAMES = 0x0000_0002;
        /// Unicode file names are stored on disk.
        const UNICODE_ON_DISK = 0x0000_0004;
        /// ACLs are preserved and enforced.
        const PERSISTENT_ACLS = 0x0000_0008;
        /// Per-file compression is supported.
        const FILE_COMPRESSION = 0x0000_0010;
        /// Disk quotas are supported.
        const VOLUME_QUOTAS = 0x0000_0020;
        /// Sparse files are supported.
        const SUPPORTS_SPARSE_FILES = 0x0000_0040;
        /// Reparse points are supported.
        const SUPPORTS_REPARSE_POINTS = 0x0000_0080;
        /// Remote storage is supported.
        const SUPPORTS_REMOTE_STORAGE = 0x0000_0100;
        /// Cleanup result information is returned.
        const RETURNS_CLEANUP_RESULT_INFO = 0x0000_0200;
        /// POSIX-style unlink and rename are supported.
        const SUPPORTS_POSIX_UNLINK_RENAME = 0x0000_0400;
        /// The volume is compressed.
        const VOLUME_IS_COMPRESSED = 0x0000_8000;
        /// Object identifiers are supported.
        const SUPPORTS_OBJECT_IDS = 0x0001_0000;
        /// The encrypted file system is supported.
        const SUPPORTS_ENCRYPTION = 0x0002_0000;
        /// Named streams are supported.
        const NAMED_STREAMS = 0x0004_0000;
        /// The volume is read-only.
        const READ_ONLY_VOLUME = 0x0008_0000;
        /// The volume supports a single sequential write.
        const SEQUENTIAL_WRITE_ONCE = 0x0010_0000;
        /// Transactions are supported.
        const SUPPORTS_TRANSACTIONS = 0x0020_0000;
        /// Hard links are supported.
        const SUPPORTS_HARD_LINKS = 0x0040_0000;
        /// Extended attributes are supported.
        const SUPPORTS_EXTENDED_ATTRIBUTES = 0x0080_0000;
        /// Files can be opened by file identifier.
        const SUPPORTS_OPEN_BY_FILE_ID = 0x0100_0000;
        /// An update sequence number journal is kept.
        const SUPPORTS_USN_JOURNAL = 0x0200_0000;
        /// Integrity streams are supported.
        const SUPPORTS_INTEGRITY_STREAMS = 0x0400_0000;
        /// Block reference counting is supported.
        const SUPPORTS_BLOCK_REFCOUNTING = 0x0800_0000;
        /// Sparse valid data length is tracked.
        const SUPPORTS_SPARSE_VDL = 0x1000_0000;
        /// The volume is a direct access volume.
        const DAX_VOLUME = 0x2000_0000;
        /// Ghosting is supported.
        const SUPPORTS_GHOSTING = 0x4000_0000;
    }
}

/// The fixed-size part of a volume information query, as the platform
/// binding reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawVolumeInformation {
    /// Volume serial number.
    pub serial_number: u32,
    /// Longest file name component the file system allows.
    pub maximum_component_length: u32,
    /// Raw file system flags.
    pub file_system_flags: u32,
}

/// Snapshot of a volume's identity and capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeInformation {
    /// The root the query was made for, with a trailing separator.
    pub root_path_name: String,
    /// The volume label.
    pub volume_name: String,
    /// Volume serial number.
    pub volume_serial_number: u32,
    /// Longest file name component the file system allows.
    pub maximum_component_length: u32,
    /// File system features.
    pub file_system_flags: FileSystemFeatures,
    /// File system name, e.g. `NTFS`.
    pub file_system_name: String,
}
