//! The narrow boundary between winpath and the operating system.
//!
//! Every native text query has the same shape: it writes into a
//! [`NativeBuffer`] and returns the written length, the required length
//! when the buffer is too small, or `0` with the failure code available
//! from [`NativeErrorSource::last_error`]. Higher layers only ever see
//! [`NativeTextQuery`], so the binding can be swapped for
//! [`ScriptedPlatform`] in tests or for [`UnsupportedPlatform`] off
//! Windows.

use std::sync::Arc;

use crate::buffer::NativeBuffer;
use crate::error::NativeErrorSource;
use crate::native::FinalPathFlags;
use crate::volume::RawVolumeInformation;

mod scripted;
mod unsupported;
#[cfg(windows)]
pub mod windows;

pub use scripted::{ScriptedCall, ScriptedPlatform, ScriptedVolume};
pub use unsupported::UnsupportedPlatform;

/// Native text queries in the uniform "written / required / 0 + last
/// error" shape.
///
/// Implementations must record the failure code of the most recent call
/// made on the calling thread, and must report `ERROR_SUCCESS` after a
/// call that legitimately produced an empty result.
pub trait NativeTextQuery: NativeErrorSource + Send + Sync {
    /// `GetFullPathNameW`.
    fn full_path_name(&self, path: &str, buffer: &mut NativeBuffer) -> usize;

    /// `GetFinalPathNameByHandleW` on a handle opened for `path`. With
    /// `resolve_links` unset the reparse point itself is opened.
    fn final_path_name(
        &self,
        path: &str,
        flags: FinalPathFlags,
        resolve_links: bool,
        buffer: &mut NativeBuffer,
    ) -> usize;

    /// `GetEnvironmentVariableW`.
    fn environment_variable(&self, name: &str, buffer: &mut NativeBuffer) -> usize;

    /// `GetVolumePathNameW`: the mount point `path` lives under.
    fn volume_path_name(&self, path: &str, buffer: &mut NativeBuffer) -> usize;

    /// `GetVolumeNameForVolumeMountPointW`. `mount_point` ends in a
    /// separator.
    fn volume_name_for_mount_point(&self, mount_point: &str, buffer: &mut NativeBuffer) -> usize;

    /// `GetVolumePathNamesForVolumeNameW`, as a NUL-separated list.
    fn volume_path_names(&self, volume_name: &str, buffer: &mut NativeBuffer) -> usize;

    /// `GetLogicalDriveStringsW`, as a NUL-separated list.
    fn logical_drive_strings(&self, buffer: &mut NativeBuffer) -> usize;

    /// `QueryDosDeviceW`, as a NUL-separated list. `None` asks for every
    /// alias.
    fn query_dos_device(&self, device_name: Option<&str>, buffer: &mut NativeBuffer) -> usize;

    /// `GetVolumeInformationW`. The label and file system name are
    /// written into the two buffers; `None` means the call failed.
    fn volume_information(
        &self,
        root_path_name: &str,
        volume_name: &mut NativeBuffer,
        file_system_name: &mut NativeBuffer,
    ) -> Option<RawVolumeInformation>;

    /// `GetFileAttributesW`; `None` means the call failed.
    fn file_attributes(&self, path: &str) -> Option<u32>;
}

/// The binding for the current target: the Win32 API on Windows,
/// [`UnsupportedPlatform`] everywhere else.
#[must_use]
pub fn system() -> Arc<dyn NativeTextQuery> {
    #[cfg(windows)]
    {
        Arc::new(windows::WindowsPlatform::new())
    }
    #[cfg(not(windows))]
    {
        Arc::new(UnsupportedPlatform)
    }
}
