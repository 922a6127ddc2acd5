//! Common fixtures for integration tests.
//!
//! A scripted machine with two local disks, a USB stick mounted in a
//! folder and a serial port, plus helpers that build the library
//! components on top of it.

use std::sync::Arc;

use winpath::buffer::BufferPool;
use winpath::config::{BufferSettings, Settings};
use winpath::platform::{ScriptedPlatform, ScriptedVolume};
use winpath::volume::FileSystemFeatures;
use winpath::{CurrentDirectories, FileAttributes, NativeFileService, VolumeResolver};

/// Volume mounted at `C:\`.
#[allow(dead_code)]
pub const SYSTEM: &str = r"\\?\Volume{5f0b1c6e-0000-4000-8000-00000000000c}\";
/// Volume mounted at `D:\` and `C:\mnt\data\`.
#[allow(dead_code)]
pub const DATA: &str = r"\\?\Volume{5f0b1c6e-0000-4000-8000-00000000000d}\";
/// Volume mounted only at `C:\mnt\usb\`.
#[allow(dead_code)]
pub const USB: &str = r"\\?\Volume{5f0b1c6e-0000-4000-8000-0000000000ff}\";

/// The scripted machine. Relative paths resolve against `C:\Users\dev`,
/// and drive `D:` remembers `D:\projects`.
#[allow(dead_code)]
pub fn machine() -> ScriptedPlatform {
    let directories = CurrentDirectories::new(r"C:\Users\dev")
        .and_then(|dirs| dirs.with_drive_directory('D', r"D:\projects"))
        .unwrap();

    ScriptedPlatform::new()
        .with_current_directories(directories)
        .with_volume(SYSTEM, ScriptedVolume::ntfs("System", 0x1A2B_3C4D))
        .with_volume(DATA, ScriptedVolume::ntfs("Data", 0x0000_DA7A))
        .with_volume(
            USB,
            ScriptedVolume::ntfs("STICK", 0x0000_0055).with_file_system(
                "exFAT",
                FileSystemFeatures::CASE_PRESERVED_NAMES | FileSystemFeatures::UNICODE_ON_DISK,
            ),
        )
        .with_mount(r"C:\", SYSTEM)
        .with_mount(r"D:\", DATA)
        .with_mount(r"C:\mnt\data\", DATA)
        .with_mount(r"C:\mnt\usb\", USB)
        .with_dos_device("COM1", &[r"\Device\Serial0"])
        .with_attributes(r"C:\Users", FileAttributes::DIRECTORY)
        .with_attributes(r"C:\Users\dev", FileAttributes::DIRECTORY)
        .with_attributes(r"C:\Users\dev\notes.txt", FileAttributes::ARCHIVE)
        .with_attributes(r"D:\projects", FileAttributes::DIRECTORY)
        .with_environment_variable("=D:", r"D:\projects")
        .with_environment_variable("PATH", r"C:\Windows;C:\Windows\System32")
}

/// A resolver over `platform` with default buffer sizes.
#[allow(dead_code)]
pub fn resolver(platform: Arc<ScriptedPlatform>) -> VolumeResolver<ScriptedPlatform> {
    resolver_with(platform, BufferSettings::default())
}

/// A resolver over `platform` with the given buffer sizes.
#[allow(dead_code)]
pub fn resolver_with(
    platform: Arc<ScriptedPlatform>,
    buffers: BufferSettings,
) -> VolumeResolver<ScriptedPlatform> {
    VolumeResolver::new(platform, Arc::new(BufferPool::new(2)), buffers)
}

/// A file service over `platform` with default settings.
#[allow(dead_code)]
pub fn file_service(platform: Arc<ScriptedPlatform>) -> NativeFileService<ScriptedPlatform> {
    NativeFileService::new(platform, Arc::new(BufferPool::new(2)), Settings::default())
}
