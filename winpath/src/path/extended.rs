//! Adding and removing the `\\?\` extended-length prefix.

use std::borrow::Cow;

use super::classify::{classify, is_extended};
use super::types::{
    native_length, PathFormat, EXTENDED_PREFIX, EXTENDED_UNC_PREFIX, LEGACY_MAX_PATH, UNC_PREFIX,
};

/// Add the extended prefix to an absolute path.
///
/// With `add_if_under_legacy_max_path` set the prefix is always added;
/// otherwise only when the path is longer than [`LEGACY_MAX_PATH`] UTF-16
/// units. UNC paths lose all their leading separators and get
/// `\\?\UNC\`. Paths that already carry a prefix, device paths, relative
/// paths and unrecognized formats are returned as they are.
///
/// # Examples
///
/// ```
/// use winpath::path::add_extended_prefix;
///
/// assert_eq!(add_extended_prefix(r"C:\Windows", true), r"\\?\C:\Windows");
/// assert_eq!(add_extended_prefix(r"C:\Windows", false), r"C:\Windows");
/// assert_eq!(add_extended_prefix(r"\\server\share", true), r"\\?\UNC\server\share");
/// assert_eq!(add_extended_prefix("relative", true), "relative");
/// ```
#[must_use]
pub fn add_extended_prefix(path: &str, add_if_under_legacy_max_path: bool) -> Cow<'_, str> {
    if !add_if_under_legacy_max_path && native_length(path) <= LEGACY_MAX_PATH {
        return Cow::Borrowed(path);
    }

    match classify(path).format {
        PathFormat::DriveAbsolute => Cow::Owned(format!("{EXTENDED_PREFIX}{path}")),
        PathFormat::UniformNamingConvention => {
            let body = path.trim_start_matches(['\\', '/']);
            Cow::Owned(format!("{EXTENDED_UNC_PREFIX}{body}"))
        }
        _ => Cow::Borrowed(path),
    }
}

/// Remove the extended prefix, rewriting `\\?\UNC\` back to `\\`.
///
/// Paths without the prefix are returned as they are.
///
/// # Examples
///
/// ```
/// use winpath::path::remove_extended_prefix;
///
/// assert_eq!(remove_extended_prefix(r"\\?\C:\Windows"), r"C:\Windows");
/// assert_eq!(remove_extended_prefix(r"\\?\UNC\server\share"), r"\\server\share");
/// assert_eq!(remove_extended_prefix(r"C:\Windows"), r"C:\Windows");
/// ```
#[must_use]
pub fn remove_extended_prefix(path: &str) -> Cow<'_, str> {
    if !is_extended(path) {
        return Cow::Borrowed(path);
    }

    if classify(path).format == PathFormat::UniformNamingConventionExtended {
        return Cow::Owned(format!("{UNC_PREFIX}{}", &path[EXTENDED_UNC_PREFIX.len()..]));
    }

    Cow::Borrowed(&path[EXTENDED_PREFIX.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_path(prefix: &str) -> String {
        let mut path = prefix.to_string();
        while native_length(&path) <= LEGACY_MAX_PATH {
            path.push_str(r"\segment");
        }
        path
    }

    #[test]
    fn test_long_paths_get_prefix_without_force() {
        let path = long_path(r"C:\data");
        let extended = add_extended_prefix(&path, false);
        assert!(extended.starts_with(r"\\?\C:\data"));
    }

    #[test]
    fn test_exactly_legacy_length_is_not_prefixed() {
        let mut path = r"C:\".to_string();
        path.push_str(&"a".repeat(LEGACY_MAX_PATH - 3));
        assert_eq!(native_length(&path), LEGACY_MAX_PATH);
        assert_eq!(add_extended_prefix(&path, false), path.as_str());
    }

    #[test]
    fn test_unc_loses_extra_separators() {
        assert_eq!(
            add_extended_prefix(r"\\\\server\share\dir", true),
            r"\\?\UNC\server\share\dir"
        );
        assert_eq!(
            remove_extended_prefix(&add_extended_prefix(r"\\\\server\share", true)),
            r"\\server\share"
        );
    }

    #[test]
    fn test_already_prefixed_is_unchanged() {
        assert_eq!(add_extended_prefix(r"\\?\C:\x", true), r"\\?\C:\x");
        assert_eq!(
            add_extended_prefix(r"\\?\UNC\s\x", true),
            r"\\?\UNC\s\x"
        );
        assert_eq!(add_extended_prefix(r"\\.\C:\x", true), r"\\.\C:\x");
    }

    #[test]
    fn test_relative_and_unknown_are_unchanged() {
        assert_eq!(add_extended_prefix(r"C:foo", true), "C:foo");
        assert_eq!(add_extended_prefix(r"\foo", true), r"\foo");
        assert_eq!(add_extended_prefix("CON", true), "CON");
        assert_eq!(add_extended_prefix(r"\\", true), r"\\");
    }

    #[test]
    fn test_round_trip_for_drive_paths() {
        for path in [r"C:\", r"C:\Windows\System32", r"d:\a b\c.txt"] {
            let extended = add_extended_prefix(path, true);
            assert_eq!(remove_extended_prefix(&extended), path);
        }
        let long = long_path(r"E:\deep");
        assert_eq!(remove_extended_prefix(&add_extended_prefix(&long, false)), long);
    }

    #[test]
    fn test_remove_keeps_device_and_volume_guid_bodies() {
        assert_eq!(remove_extended_prefix(r"\\?\Volume{1234}\"), r"Volume{1234}\");
        assert_eq!(remove_extended_prefix(r"\\.\C:\"), r"\\.\C:\");
        assert_eq!(remove_extended_prefix(r"\\?\UNC"), "UNC");
    }
}
