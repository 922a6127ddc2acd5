//! An in-memory binding that follows the native size-reporting
//! conventions.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;

use super::NativeTextQuery;
use crate::buffer::NativeBuffer;
use crate::error::{NativeErrorCode, NativeErrorSource};
use crate::native::{FileAttributes, FinalPathFlags};
use crate::path::{
    add_extended_prefix, add_trailing_separator, classify, full_path, is_extended,
    remove_extended_prefix, remove_trailing_separators, CurrentDirectories, PathFormat,
};
use crate::volume::{FileSystemFeatures, RawVolumeInformation};

thread_local! {
    static LAST_ERROR: Cell<NativeErrorCode> = const { Cell::new(NativeErrorCode::ERROR_SUCCESS) };
}

fn set_last_error(code: NativeErrorCode) {
    LAST_ERROR.with(|last| last.set(code));
}

/// The [`NativeTextQuery`] methods, for failure injection and call
/// counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptedCall {
    /// [`NativeTextQuery::full_path_name`]
    FullPathName,
    /// [`NativeTextQuery::final_path_name`]
    FinalPathName,
    /// [`NativeTextQuery::environment_variable`]
    EnvironmentVariable,
    /// [`NativeTextQuery::volume_path_name`]
    VolumePathName,
    /// [`NativeTextQuery::volume_name_for_mount_point`]
    VolumeNameForMountPoint,
    /// [`NativeTextQuery::volume_path_names`]
    VolumePathNames,
    /// [`NativeTextQuery::logical_drive_strings`]
    LogicalDriveStrings,
    /// [`NativeTextQuery::query_dos_device`]
    QueryDosDevice,
    /// [`NativeTextQuery::volume_information`]
    VolumeInformation,
    /// [`NativeTextQuery::file_attributes`]
    FileAttributes,
}

/// A volume known to a [`ScriptedPlatform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedVolume {
    /// Volume label.
    pub label: String,
    /// Volume serial number.
    pub serial_number: u32,
    /// Longest file name component.
    pub maximum_component_length: u32,
    /// File system features.
    pub file_system_flags: FileSystemFeatures,
    /// File system name.
    pub file_system_name: String,
}

impl ScriptedVolume {
    /// An NTFS volume with the given label and serial number.
    #[must_use]
    pub fn ntfs(label: impl Into<String>, serial_number: u32) -> Self {
        Self {
            label: label.into(),
            serial_number,
            maximum_component_length: 255,
            file_system_flags: FileSystemFeatures::CASE_SENSITIVE_SEARCH
                | FileSystemFeatures::CASE_PRESERVED_NAMES
                | FileSystemFeatures::UNICODE_ON_DISK
                | FileSystemFeatures::PERSISTENT_ACLS
                | FileSystemFeatures::FILE_COMPRESSION
                | FileSystemFeatures::SUPPORTS_REPARSE_POINTS
                | FileSystemFeatures::NAMED_STREAMS
                | FileSystemFeatures::SUPPORTS_HARD_LINKS,
            file_system_name: "NTFS".to_string(),
        }
    }

    /// Replace the file system name and features.
    #[must_use]
    pub fn with_file_system(mut self, name: impl Into<String>, flags: FileSystemFeatures) -> Self {
        self.file_system_name = name.into();
        self.file_system_flags = flags;
        self
    }
}

#[derive(Debug, Default)]
struct State {
    current_directories: CurrentDirectories,
    // Keyed by the upper-cased volume GUID path.
    volumes: BTreeMap<String, (String, ScriptedVolume)>,
    // Mount point (with trailing separator) to volume GUID path.
    mounts: BTreeMap<String, (String, String)>,
    dos_devices: BTreeMap<String, (String, Vec<String>)>,
    environment: BTreeMap<String, String>,
    attributes: HashMap<String, FileAttributes>,
    final_paths: HashMap<String, String>,
    failures: HashMap<ScriptedCall, NativeErrorCode>,
    calls: HashMap<ScriptedCall, usize>,
    last_full_path_query: Option<String>,
}

/// In-memory [`NativeTextQuery`] built from a table of volumes, mount
/// points, device aliases, environment variables and file attributes.
///
/// Results are sized like the real API: length-returning queries report
/// the required length when the buffer is too small, boolean queries fail
/// with `ERROR_FILENAME_EXCED_RANGE`, `QueryDosDeviceW` fails with
/// `ERROR_INSUFFICIENT_BUFFER` and `GetVolumePathNamesForVolumeNameW`
/// reports the required length with `ERROR_MORE_DATA`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use winpath::buffer::BufferPool;
/// use winpath::config::BufferSettings;
/// use winpath::platform::{ScriptedPlatform, ScriptedVolume};
/// use winpath::volume::VolumeResolver;
///
/// let volume = r"\\?\Volume{11111111-2222-3333-4444-555555555555}\";
/// let platform = ScriptedPlatform::new()
///     .with_volume(volume, ScriptedVolume::ntfs("System", 0x1234))
///     .with_mount(r"C:\", volume);
/// let resolver = VolumeResolver::new(
///     Arc::new(platform),
///     Arc::new(BufferPool::default()),
///     BufferSettings::default(),
/// );
/// assert_eq!(resolver.canonical_root(r"C:\Windows").unwrap(), volume);
/// assert_eq!(resolver.drive_letter(volume).unwrap().as_deref(), Some(r"C:\"));
/// ```
#[derive(Debug, Default)]
pub struct ScriptedPlatform {
    state: Mutex<State>,
}

impl ScriptedPlatform {
    /// An empty platform whose current directory is `C:\`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `directories`.
    #[must_use]
    pub fn with_current_directories(mut self, directories: CurrentDirectories) -> Self {
        self.state.get_mut().current_directories = directories;
        self
    }

    /// Register a volume by its `\\?\Volume{GUID}\` path.
    #[must_use]
    pub fn with_volume(mut self, guid_path: &str, volume: ScriptedVolume) -> Self {
        let guid_path = add_trailing_separator(guid_path).into_owned();
        self.state
            .get_mut()
            .volumes
            .insert(guid_path.to_uppercase(), (guid_path, volume));
        self
    }

    /// Mount the volume `guid_path` at `mount_point`. Drive roots such as
    /// `D:\` also become logical drives and `D:` device aliases.
    #[must_use]
    pub fn with_mount(mut self, mount_point: &str, guid_path: &str) -> Self {
        let mount_point = add_trailing_separator(mount_point).into_owned();
        let guid_path = add_trailing_separator(guid_path).into_owned();
        self.state
            .get_mut()
            .mounts
            .insert(mount_point.to_uppercase(), (mount_point, guid_path));
        self
    }

    /// Register a DOS device alias and its targets.
    #[must_use]
    pub fn with_dos_device(mut self, name: &str, targets: &[&str]) -> Self {
        let targets = targets.iter().map(|t| (*t).to_string()).collect();
        self.state
            .get_mut()
            .dos_devices
            .insert(name.to_uppercase(), (name.to_string(), targets));
        self
    }

    /// Set an environment variable. Names are case-insensitive.
    #[must_use]
    pub fn with_environment_variable(mut self, name: &str, value: &str) -> Self {
        self.state
            .get_mut()
            .environment
            .insert(name.to_uppercase(), value.to_string());
        self
    }

    /// Make `path` exist with `attributes`.
    #[must_use]
    pub fn with_attributes(mut self, path: &str, attributes: FileAttributes) -> Self {
        let state = self.state.get_mut();
        let key = lookup_key(path, &state.current_directories);
        state.attributes.insert(key, attributes);
        self
    }

    /// Make `link` a symbolic link to `target`.
    #[must_use]
    pub fn with_final_path(mut self, link: &str, target: &str) -> Self {
        let state = self.state.get_mut();
        let key = lookup_key(link, &state.current_directories);
        let target = full_path(target, &state.current_directories)
            .unwrap_or_else(|_| target.to_string());
        state.final_paths.insert(key, target);
        self
    }

    /// Make every call to `call` fail with `code`.
    #[must_use]
    pub fn with_failure(mut self, call: ScriptedCall, code: NativeErrorCode) -> Self {
        self.state.get_mut().failures.insert(call, code);
        self
    }

    /// How many times `call` was made.
    #[must_use]
    pub fn call_count(&self, call: ScriptedCall) -> usize {
        self.state.lock().calls.get(&call).copied().unwrap_or(0)
    }

    /// The path most recently passed to
    /// [`NativeTextQuery::full_path_name`].
    #[must_use]
    pub fn last_full_path_query(&self) -> Option<String> {
        self.state.lock().last_full_path_query.clone()
    }
}

impl NativeErrorSource for ScriptedPlatform {
    fn last_error(&self) -> NativeErrorCode {
        LAST_ERROR.with(Cell::get)
    }
}

impl NativeTextQuery for ScriptedPlatform {
    fn full_path_name(&self, path: &str, buffer: &mut NativeBuffer) -> usize {
        let mut state = self.state.lock();
        state.last_full_path_query = Some(path.to_string());
        if state.begin(ScriptedCall::FullPathName) {
            return 0;
        }
        if is_extended(path) {
            return buffer.write_str(path);
        }
        match full_path(path, &state.current_directories) {
            Ok(full) => buffer.write_str(&full),
            Err(_) => fail(NativeErrorCode::ERROR_INVALID_NAME),
        }
    }

    fn final_path_name(
        &self,
        path: &str,
        flags: FinalPathFlags,
        resolve_links: bool,
        buffer: &mut NativeBuffer,
    ) -> usize {
        let mut state = self.state.lock();
        if state.begin(ScriptedCall::FinalPathName) {
            return 0;
        }
        let Ok(full) = full_path(path, &state.current_directories) else {
            return fail(NativeErrorCode::ERROR_INVALID_NAME);
        };
        let key = lookup_key(&full, &state.current_directories);
        let target = match state.final_paths.get(&key) {
            Some(target) if resolve_links => target.clone(),
            Some(_) => full,
            None if state.attributes.contains_key(&key) => full,
            None => return fail(NativeErrorCode::ERROR_FILE_NOT_FOUND),
        };

        let parsed = classify(&target);
        let remainder = target[parsed.root_length..].trim_start_matches('\\');
        let formatted = if flags.contains(FinalPathFlags::VOLUME_NAME_NONE) {
            format!("\\{remainder}")
        } else if flags.contains(FinalPathFlags::VOLUME_NAME_NT) {
            match state.volume_index_for(&target) {
                Some(index) => format!("\\Device\\HarddiskVolume{}\\{remainder}", index + 1),
                None => return fail(NativeErrorCode::ERROR_PATH_NOT_FOUND),
            }
        } else if flags.contains(FinalPathFlags::VOLUME_NAME_GUID) {
            match state.mount_for(&target) {
                Some((_, guid)) => format!("{guid}{remainder}"),
                None => return fail(NativeErrorCode::ERROR_PATH_NOT_FOUND),
            }
        } else {
            add_extended_prefix(&target, true).into_owned()
        };
        buffer.write_str(&formatted)
    }

    fn environment_variable(&self, name: &str, buffer: &mut NativeBuffer) -> usize {
        let mut state = self.state.lock();
        if state.begin(ScriptedCall::EnvironmentVariable) {
            return 0;
        }
        match state.environment.get(&name.to_uppercase()) {
            Some(value) => buffer.write_str(value),
            None => fail(NativeErrorCode::ERROR_ENVVAR_NOT_FOUND),
        }
    }

    fn volume_path_name(&self, path: &str, buffer: &mut NativeBuffer) -> usize {
        let mut state = self.state.lock();
        if state.begin(ScriptedCall::VolumePathName) {
            return 0;
        }
        let unprefixed = remove_extended_prefix(path);
        let Ok(full) = full_path(&unprefixed, &state.current_directories) else {
            return fail(NativeErrorCode::ERROR_INVALID_NAME);
        };
        if let Some((mount_point, _)) = state.mount_for(&full) {
            let mount_point = mount_point.to_string();
            return write_bool_style(buffer, &mount_point);
        }
        let parsed = classify(&full);
        if parsed.format == PathFormat::UniformNamingConvention {
            let root = add_trailing_separator(parsed.root(&full)).into_owned();
            return write_bool_style(buffer, &root);
        }
        fail(NativeErrorCode::ERROR_INVALID_DRIVE)
    }

    fn volume_name_for_mount_point(&self, mount_point: &str, buffer: &mut NativeBuffer) -> usize {
        let mut state = self.state.lock();
        if state.begin(ScriptedCall::VolumeNameForMountPoint) {
            return 0;
        }
        if !mount_point.ends_with('\\') {
            return fail(NativeErrorCode::ERROR_INVALID_NAME);
        }
        let key = remove_extended_prefix(mount_point).to_uppercase();
        let guid = state
            .volumes
            .get(&mount_point.to_uppercase())
            .map(|(guid, _)| guid.clone())
            .or_else(|| state.mounts.get(&key).map(|(_, guid)| guid.clone()));
        match guid {
            Some(guid) => write_bool_style(buffer, &guid),
            None => fail(NativeErrorCode::ERROR_PATH_NOT_FOUND),
        }
    }

    fn volume_path_names(&self, volume_name: &str, buffer: &mut NativeBuffer) -> usize {
        let mut state = self.state.lock();
        if state.begin(ScriptedCall::VolumePathNames) {
            return 0;
        }
        let key = volume_name.to_uppercase();
        if !state.volumes.contains_key(&key) {
            return fail(NativeErrorCode::ERROR_FILE_NOT_FOUND);
        }
        let mount_points: Vec<&str> = state
            .mounts
            .values()
            .filter(|(_, guid)| guid.to_uppercase() == key)
            .map(|(mount_point, _)| mount_point.as_str())
            .collect();
        let written = buffer.write_str(&multi_string(&mount_points));
        if written > buffer.capacity() {
            set_last_error(NativeErrorCode::ERROR_MORE_DATA);
        }
        written
    }

    fn logical_drive_strings(&self, buffer: &mut NativeBuffer) -> usize {
        let mut state = self.state.lock();
        if state.begin(ScriptedCall::LogicalDriveStrings) {
            return 0;
        }
        let drives = state.drive_roots();
        buffer.write_str(&multi_string(&drives))
    }

    fn query_dos_device(&self, device_name: Option<&str>, buffer: &mut NativeBuffer) -> usize {
        let mut state = self.state.lock();
        if state.begin(ScriptedCall::QueryDosDevice) {
            return 0;
        }
        let value = match device_name {
            None => {
                let mut names: Vec<String> =
                    state.dos_devices.values().map(|(name, _)| name.clone()).collect();
                names.extend(
                    state
                        .drive_roots()
                        .iter()
                        .map(|root| root.trim_end_matches('\\').to_string()),
                );
                names.sort();
                names.dedup();
                multi_string(&names)
            }
            Some(name) => match state.dos_device_targets(name) {
                Some(targets) => multi_string(&targets),
                None => return fail(NativeErrorCode::ERROR_FILE_NOT_FOUND),
            },
        };
        let written = buffer.write_str(&value);
        if written > buffer.capacity() {
            return fail(NativeErrorCode::ERROR_INSUFFICIENT_BUFFER);
        }
        written
    }

    fn volume_information(
        &self,
        root_path_name: &str,
        volume_name: &mut NativeBuffer,
        file_system_name: &mut NativeBuffer,
    ) -> Option<RawVolumeInformation> {
        let mut state = self.state.lock();
        if state.begin(ScriptedCall::VolumeInformation) {
            return None;
        }
        if !root_path_name.ends_with('\\') {
            fail(NativeErrorCode::ERROR_INVALID_NAME);
            return None;
        }
        let Some(volume) = state.volume_at(root_path_name) else {
            fail(NativeErrorCode::ERROR_PATH_NOT_FOUND);
            return None;
        };
        let label_fits = volume_name.write_str(&volume.label) < volume_name.capacity();
        let name_fits =
            file_system_name.write_str(&volume.file_system_name) < file_system_name.capacity();
        if !(label_fits && name_fits) {
            fail(NativeErrorCode::ERROR_BAD_PATHNAME);
            return None;
        }
        Some(RawVolumeInformation {
            serial_number: volume.serial_number,
            maximum_component_length: volume.maximum_component_length,
            file_system_flags: volume.file_system_flags.bits(),
        })
    }

    fn file_attributes(&self, path: &str) -> Option<u32> {
        let mut state = self.state.lock();
        if state.begin(ScriptedCall::FileAttributes) {
            return None;
        }
        let key = lookup_key(path, &state.current_directories);
        if let Some(attributes) = state.attributes.get(&key) {
            return Some(attributes.bits());
        }
        if state.mounts.contains_key(&format!("{key}\\")) || state.mounts.contains_key(&key) {
            return Some(FileAttributes::DIRECTORY.bits());
        }
        fail(NativeErrorCode::ERROR_FILE_NOT_FOUND);
        None
    }
}

impl State {
    // Counts the call and resets the last error to the injected failure,
    // if any. Returns whether the call must fail.
    fn begin(&mut self, call: ScriptedCall) -> bool {
        *self.calls.entry(call).or_insert(0) += 1;
        let failure = self.failures.get(&call).copied();
        set_last_error(failure.unwrap_or(NativeErrorCode::ERROR_SUCCESS));
        failure.is_some()
    }

    // The longest mount point containing `path`.
    fn mount_for(&self, path: &str) -> Option<(&str, &str)> {
        let wanted = add_trailing_separator(path).to_uppercase();
        self.mounts
            .iter()
            .filter(|(key, _)| wanted.starts_with(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, (mount_point, guid))| (mount_point.as_str(), guid.as_str()))
    }

    fn volume_index_for(&self, path: &str) -> Option<usize> {
        let (_, guid) = self.mount_for(path)?;
        let key = guid.to_uppercase();
        self.volumes.keys().position(|candidate| *candidate == key)
    }

    fn volume_at(&self, root: &str) -> Option<ScriptedVolume> {
        let key = remove_extended_prefix(root).to_uppercase();
        let guid_key = match self.mounts.get(&key) {
            Some((_, guid)) => guid.to_uppercase(),
            None => root.to_uppercase(),
        };
        self.volumes.get(&guid_key).map(|(_, volume)| volume.clone())
    }

    fn drive_roots(&self) -> Vec<String> {
        self.mounts
            .values()
            .filter(|(mount_point, _)| {
                classify(mount_point).format == PathFormat::DriveAbsolute && mount_point.len() == 3
            })
            .map(|(mount_point, _)| mount_point.clone())
            .collect()
    }

    fn dos_device_targets(&self, name: &str) -> Option<Vec<String>> {
        let key = name.to_uppercase();
        if let Some((_, targets)) = self.dos_devices.get(&key) {
            return Some(targets.clone());
        }
        // Drive letters alias the device of their volume.
        let (_, guid) = self.mounts.get(&format!("{key}\\"))?;
        let index = self.volumes.keys().position(|c| *c == guid.to_uppercase())?;
        Some(vec![format!("\\Device\\HarddiskVolume{}", index + 1)])
    }
}

fn lookup_key(path: &str, directories: &CurrentDirectories) -> String {
    let full = full_path(path, directories).unwrap_or_else(|_| path.to_string());
    remove_trailing_separators(&full).to_uppercase()
}

fn multi_string<S: AsRef<str>>(entries: &[S]) -> String {
    let mut value = String::new();
    for entry in entries {
        value.push_str(entry.as_ref());
        value.push('\0');
    }
    value
}

fn fail(code: NativeErrorCode) -> usize {
    set_last_error(code);
    0
}

fn write_bool_style(buffer: &mut NativeBuffer, value: &str) -> usize {
    let written = buffer.write_str(value);
    if written > buffer.capacity() {
        return fail(NativeErrorCode::ERROR_FILENAME_EXCED_RANGE);
    }
    written
}
