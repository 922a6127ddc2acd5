//! The Win32 binding.
//!
//! Each query adapts one API to the uniform shape of
//! [`NativeTextQuery`]: length-returning APIs pass their result through,
//! boolean APIs report the length up to the first NUL on success and `0`
//! on failure. The last error is captured right after each call and kept
//! per thread.

#![allow(unsafe_code)]

use std::cell::Cell;
use std::iter;
use std::ptr;

use windows_sys::Win32::Foundation::{
    CloseHandle, GetLastError, SetLastError, ERROR_MORE_DATA, INVALID_HANDLE_VALUE,
};
use windows_sys::Win32::Storage::FileSystem::{
    CreateFileW, GetFileAttributesW, GetFinalPathNameByHandleW, GetFullPathNameW,
    GetLogicalDriveStringsW, GetVolumeInformationW, GetVolumeNameForVolumeMountPointW,
    GetVolumePathNameW, GetVolumePathNamesForVolumeNameW, QueryDosDeviceW,
    FILE_FLAG_BACKUP_SEMANTICS, FILE_FLAG_OPEN_REPARSE_POINT, FILE_SHARE_DELETE, FILE_SHARE_READ,
    FILE_SHARE_WRITE, INVALID_FILE_ATTRIBUTES, OPEN_EXISTING,
};
use windows_sys::Win32::System::Environment::GetEnvironmentVariableW;

use super::NativeTextQuery;
use crate::buffer::NativeBuffer;
use crate::error::{NativeErrorCode, NativeErrorSource};
use crate::native::FinalPathFlags;
use crate::volume::RawVolumeInformation;

thread_local! {
    static LAST_ERROR: Cell<NativeErrorCode> = const { Cell::new(NativeErrorCode::ERROR_SUCCESS) };
}

/// [`NativeTextQuery`] over the Win32 API.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsPlatform;

impl WindowsPlatform {
    /// The binding.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(iter::once(0)).collect()
}

fn clear_last_error() {
    // SAFETY: SetLastError only writes the calling thread's error slot.
    unsafe { SetLastError(0) };
}

fn capture_last_error() -> NativeErrorCode {
    // SAFETY: GetLastError only reads the calling thread's error slot.
    let code = NativeErrorCode::new(unsafe { GetLastError() });
    LAST_ERROR.with(|last| last.set(code));
    code
}

fn record(code: NativeErrorCode) {
    LAST_ERROR.with(|last| last.set(code));
}

fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

// Length-returning APIs: the result is already in the uniform shape.
fn length_result(returned: u32) -> usize {
    if returned == 0 {
        capture_last_error();
    } else {
        record(NativeErrorCode::ERROR_SUCCESS);
    }
    to_usize(returned)
}

// BOOL APIs: the written length is up to the first NUL.
fn bool_result(succeeded: bool, buffer: &mut NativeBuffer) -> usize {
    if !succeeded {
        capture_last_error();
        return 0;
    }
    record(NativeErrorCode::ERROR_SUCCESS);
    buffer.set_length_to_first_null();
    buffer.len()
}

impl NativeErrorSource for WindowsPlatform {
    fn last_error(&self) -> NativeErrorCode {
        LAST_ERROR.with(Cell::get)
    }
}

impl NativeTextQuery for WindowsPlatform {
    fn full_path_name(&self, path: &str, buffer: &mut NativeBuffer) -> usize {
        let path = wide(path);
        clear_last_error();
        // SAFETY: `path` is NUL-terminated and the buffer pointer is valid
        // for `capacity` characters.
        let returned = unsafe {
            GetFullPathNameW(
                path.as_ptr(),
                buffer.capacity_u32(),
                buffer.as_mut_ptr(),
                ptr::null_mut(),
            )
        };
        length_result(returned)
    }

    fn final_path_name(
        &self,
        path: &str,
        flags: FinalPathFlags,
        resolve_links: bool,
        buffer: &mut NativeBuffer,
    ) -> usize {
        let path = wide(path);
        let mut open_flags = FILE_FLAG_BACKUP_SEMANTICS;
        if !resolve_links {
            open_flags |= FILE_FLAG_OPEN_REPARSE_POINT;
        }
        clear_last_error();
        // SAFETY: `path` is NUL-terminated; no security attributes or
        // template handle are passed.
        let handle = unsafe {
            CreateFileW(
                path.as_ptr(),
                0,
                FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE,
                ptr::null(),
                OPEN_EXISTING,
                open_flags,
                ptr::null_mut(),
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            capture_last_error();
            return 0;
        }

        // SAFETY: `handle` is open and the buffer pointer is valid for
        // `capacity` characters.
        let returned = unsafe {
            GetFinalPathNameByHandleW(
                handle,
                buffer.as_mut_ptr(),
                buffer.capacity_u32(),
                flags.bits(),
            )
        };
        let result = length_result(returned);
        // SAFETY: `handle` was opened above and is closed exactly once.
        unsafe { CloseHandle(handle) };
        result
    }

    fn environment_variable(&self, name: &str, buffer: &mut NativeBuffer) -> usize {
        let name = wide(name);
        clear_last_error();
        // SAFETY: `name` is NUL-terminated and the buffer pointer is valid
        // for `capacity` characters.
        let returned = unsafe {
            GetEnvironmentVariableW(name.as_ptr(), buffer.as_mut_ptr(), buffer.capacity_u32())
        };
        length_result(returned)
    }

    fn volume_path_name(&self, path: &str, buffer: &mut NativeBuffer) -> usize {
        let path = wide(path);
        clear_last_error();
        // SAFETY: as for `full_path_name`.
        let succeeded = unsafe {
            GetVolumePathNameW(path.as_ptr(), buffer.as_mut_ptr(), buffer.capacity_u32())
        } != 0;
        bool_result(succeeded, buffer)
    }

    fn volume_name_for_mount_point(&self, mount_point: &str, buffer: &mut NativeBuffer) -> usize {
        let mount_point = wide(mount_point);
        clear_last_error();
        // SAFETY: as for `full_path_name`.
        let succeeded = unsafe {
            GetVolumeNameForVolumeMountPointW(
                mount_point.as_ptr(),
                buffer.as_mut_ptr(),
                buffer.capacity_u32(),
            )
        } != 0;
        bool_result(succeeded, buffer)
    }

    fn volume_path_names(&self, volume_name: &str, buffer: &mut NativeBuffer) -> usize {
        let volume_name = wide(volume_name);
        let mut return_length = 0u32;
        clear_last_error();
        // SAFETY: as for `full_path_name`; `return_length` outlives the
        // call.
        let succeeded = unsafe {
            GetVolumePathNamesForVolumeNameW(
                volume_name.as_ptr(),
                buffer.as_mut_ptr(),
                buffer.capacity_u32(),
                &mut return_length,
            )
        } != 0;

        if succeeded {
            record(NativeErrorCode::ERROR_SUCCESS);
            return to_usize(return_length);
        }
        let code = capture_last_error();
        let required = to_usize(return_length);
        if code.value() == ERROR_MORE_DATA && required > buffer.capacity() {
            return required;
        }
        0
    }

    fn logical_drive_strings(&self, buffer: &mut NativeBuffer) -> usize {
        clear_last_error();
        // SAFETY: the buffer pointer is valid for `capacity` characters.
        let returned =
            unsafe { GetLogicalDriveStringsW(buffer.capacity_u32(), buffer.as_mut_ptr()) };
        length_result(returned)
    }

    fn query_dos_device(&self, device_name: Option<&str>, buffer: &mut NativeBuffer) -> usize {
        let device_name = device_name.map(wide);
        let name_ptr = device_name.as_ref().map_or(ptr::null(), |name| name.as_ptr());
        clear_last_error();
        // SAFETY: `name_ptr` is null or NUL-terminated and the buffer
        // pointer is valid for `capacity` characters.
        let returned =
            unsafe { QueryDosDeviceW(name_ptr, buffer.as_mut_ptr(), buffer.capacity_u32()) };
        length_result(returned)
    }

    fn volume_information(
        &self,
        root_path_name: &str,
        volume_name: &mut NativeBuffer,
        file_system_name: &mut NativeBuffer,
    ) -> Option<RawVolumeInformation> {
        let root = wide(root_path_name);
        let mut raw = RawVolumeInformation::default();
        clear_last_error();
        // SAFETY: `root` is NUL-terminated, both buffers are valid for their
        // capacities and the out parameters outlive the call.
        let succeeded = unsafe {
            GetVolumeInformationW(
                root.as_ptr(),
                volume_name.as_mut_ptr(),
                volume_name.capacity_u32(),
                &mut raw.serial_number,
                &mut raw.maximum_component_length,
                &mut raw.file_system_flags,
                file_system_name.as_mut_ptr(),
                file_system_name.capacity_u32(),
            )
        } != 0;

        if succeeded {
            record(NativeErrorCode::ERROR_SUCCESS);
            Some(raw)
        } else {
            capture_last_error();
            None
        }
    }

    fn file_attributes(&self, path: &str) -> Option<u32> {
        let path = wide(path);
        clear_last_error();
        // SAFETY: `path` is NUL-terminated.
        let attributes = unsafe { GetFileAttributesW(path.as_ptr()) };
        if attributes == INVALID_FILE_ATTRIBUTES {
            capture_last_error();
            None
        } else {
            record(NativeErrorCode::ERROR_SUCCESS);
            Some(attributes)
        }
    }
}
