use super::NativeTextQuery;
use crate::buffer::NativeBuffer;
use crate::error::{NativeErrorCode, NativeErrorSource};
use crate::native::FinalPathFlags;
use crate::volume::RawVolumeInformation;

/// Binding for targets without the Win32 API.
///
/// Every query fails with `ERROR_CALL_NOT_IMPLEMENTED`, which the buffer
/// protocol turns into a `NativeOperationFailed` error.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

impl NativeErrorSource for UnsupportedPlatform {
    fn last_error(&self) -> NativeErrorCode {
        NativeErrorCode::ERROR_CALL_NOT_IMPLEMENTED
    }
}

impl NativeTextQuery for UnsupportedPlatform {
    fn full_path_name(&self, _path: &str, _buffer: &mut NativeBuffer) -> usize {
        0
    }

    fn final_path_name(
        &self,
        _path: &str,
        _flags: FinalPathFlags,
        _resolve_links: bool,
        _buffer: &mut NativeBuffer,
    ) -> usize {
        0
    }

    fn environment_variable(&self, _name: &str, _buffer: &mut NativeBuffer) -> usize {
        0
    }

    fn volume_path_name(&self, _path: &str, _buffer: &mut NativeBuffer) -> usize {
        0
    }

    fn volume_name_for_mount_point(&self, _mount_point: &str, _buffer: &mut NativeBuffer) -> usize {
        0
    }

    fn volume_path_names(&self, _volume_name: &str, _buffer: &mut NativeBuffer) -> usize {
        0
    }

    fn logical_drive_strings(&self, _buffer: &mut NativeBuffer) -> usize {
        0
    }

    fn query_dos_device(&self, _device_name: Option<&str>, _buffer: &mut NativeBuffer) -> usize {
        0
    }

    fn volume_information(
        &self,
        _root_path_name: &str,
        _volume_name: &mut NativeBuffer,
        _file_system_name: &mut NativeBuffer,
    ) -> Option<RawVolumeInformation> {
        None
    }

    fn file_attributes(&self, _path: &str) -> Option<u32> {
        None
    }
}
