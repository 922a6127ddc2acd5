//! Structural classification of path strings.
//!
//! Classification is pure string inspection; no native calls are made and
//! every input, the empty string included, yields a [`ParsedPath`].

use super::types::{
    is_separator_byte, ParsedPath, PathFormat, EXTENDED_PREFIX, RESERVED_DEVICE_NAMES,
};

/// Classify `path` into its format and root length.
///
/// Both separator orientations are accepted. The root length is measured
/// in bytes of `path`:
///
/// - `X:\` for drive-absolute paths, `X:` for drive-relative ones,
/// - `\\server\share` plus one trailing separator if present; every
///   leading separator is kept in the root,
/// - `\\?\UNC\server\share\`, `\\?\X:\`, `\\?\Volume{..}\` and
///   `\\.\name\` for the prefixed forms,
/// - the bare device name for reserved names such as `CON`,
/// - the single separator of a rooted path like `\foo`.
///
/// # Examples
///
/// ```
/// use winpath::path::{classify, PathFormat};
///
/// let parsed = classify(r"\\server\share\dir");
/// assert_eq!(parsed.format, PathFormat::UniformNamingConvention);
/// assert_eq!(parsed.root_length, r"\\server\share\".len());
///
/// let parsed = classify("C:notes.txt");
/// assert_eq!(parsed.format, PathFormat::DriveRelative);
/// assert!(parsed.is_relative);
///
/// let parsed = classify("CON:Alt");
/// assert_eq!(parsed.format, PathFormat::Device);
/// assert!(parsed.is_device);
/// ```
#[must_use]
pub fn classify(path: &str) -> ParsedPath {
    let bytes = path.as_bytes();

    if bytes.is_empty() {
        return ParsedPath::new(PathFormat::Relative, 0);
    }

    if bytes.len() >= 2 && is_separator_byte(bytes[0]) && is_separator_byte(bytes[1]) {
        return classify_double_separator(path);
    }

    if is_separator_byte(bytes[0]) {
        return ParsedPath::new(PathFormat::Relative, 1);
    }

    if bytes.len() >= 2 && bytes[1] == b':' {
        if !bytes[0].is_ascii_alphabetic() {
            return ParsedPath::new(PathFormat::UnknownFormat, 0);
        }
        if bytes.len() >= 3 && is_separator_byte(bytes[2]) {
            return ParsedPath::new(PathFormat::DriveAbsolute, 3);
        }
        return ParsedPath::new(PathFormat::DriveRelative, 2);
    }

    if let Some(name) = reserved_device_name(path) {
        return ParsedPath::new(PathFormat::Device, name.len());
    }

    ParsedPath::new(PathFormat::Relative, 0)
}

/// The reserved device name `path` refers to, if it is one.
///
/// Matches a bare name such as `CON` or `lpt1`, case-insensitively,
/// optionally followed by a colon and an ignored suffix (`CON:Alt`). The
/// name is returned with its original casing.
///
/// # Examples
///
/// ```
/// use winpath::path::reserved_device_name;
///
/// assert_eq!(reserved_device_name("CON:Alt"), Some("CON"));
/// assert_eq!(reserved_device_name("nul"), Some("nul"));
/// assert_eq!(reserved_device_name("CONSOLE"), None);
/// assert_eq!(reserved_device_name(r"dir\CON"), None);
/// ```
#[must_use]
pub fn reserved_device_name(path: &str) -> Option<&str> {
    let name = path.split(':').next().unwrap_or(path);
    RESERVED_DEVICE_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
        .then_some(name)
}

/// Whether `path` carries the literal `\\?\` prefix.
#[must_use]
pub fn is_extended(path: &str) -> bool {
    path.starts_with(EXTENDED_PREFIX)
}

/// Whether `path` addresses a device.
#[must_use]
pub fn is_device(path: &str) -> bool {
    classify(path).is_device
}

/// Whether `path` depends on a current directory.
#[must_use]
pub fn is_relative(path: &str) -> bool {
    classify(path).is_relative
}

/// The root of `path` as determined by [`classify`].
///
/// # Examples
///
/// ```
/// use winpath::path::get_root;
///
/// assert_eq!(get_root(r"C:\Windows\System32"), r"C:\");
/// assert_eq!(get_root(r"\\server\share\dir"), r"\\server\share\");
/// assert_eq!(get_root("relative"), "");
/// ```
#[must_use]
pub fn get_root(path: &str) -> &str {
    classify(path).root(path)
}

fn classify_double_separator(path: &str) -> ParsedPath {
    let bytes = path.as_bytes();
    let len = bytes.len();

    let prefixed = len >= 3
        && (bytes[2] == b'?' || bytes[2] == b'.')
        && (len == 3 || is_separator_byte(bytes[3]));

    if prefixed {
        if len <= 4 {
            return ParsedPath::new(PathFormat::UnknownFormat, len);
        }
        let rest = &path[4..];
        if bytes[2] == b'?' {
            if is_unc_marker(rest) {
                if rest.len() <= 4 || is_separator_byte(rest.as_bytes()[4]) {
                    return ParsedPath::new(PathFormat::UnknownFormat, len.min(8));
                }
                return ParsedPath::new(
                    PathFormat::UniformNamingConventionExtended,
                    unc_root_end(path, 8),
                );
            }
            if is_drive_prefix(rest) {
                return ParsedPath::new(PathFormat::VolumeAbsoluteExtended, len.min(7));
            }
            if starts_with_ignore_case(rest, "Volume{") {
                return ParsedPath::new(
                    PathFormat::VolumeAbsoluteExtended,
                    segment_end(path, 4),
                );
            }
        }
        return ParsedPath::new(PathFormat::Device, segment_end(path, 4));
    }

    let leading = bytes.iter().take_while(|&&b| is_separator_byte(b)).count();
    if leading == len {
        return ParsedPath::new(PathFormat::UnknownFormat, len);
    }
    ParsedPath::new(
        PathFormat::UniformNamingConvention,
        unc_root_end(path, leading),
    )
}

// `UNC` followed by a separator or the end of the string.
fn is_unc_marker(rest: &str) -> bool {
    starts_with_ignore_case(rest, "UNC")
        && (rest.len() == 3 || is_separator_byte(rest.as_bytes()[3]))
}

// `X:` followed by a separator or the end of the string.
fn is_drive_prefix(rest: &str) -> bool {
    let bytes = rest.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || is_separator_byte(bytes[2]))
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

// Offset just past the next separator at or after `from`, or the length.
fn segment_end(path: &str, from: usize) -> usize {
    path.as_bytes()[from..]
        .iter()
        .position(|&b| is_separator_byte(b))
        .map_or(path.len(), |offset| from + offset + 1)
}

// `server` starts at `start`; the root ends after `server\share\`.
fn unc_root_end(path: &str, start: usize) -> usize {
    let server_end = segment_end(path, start);
    if server_end >= path.len() {
        return path.len();
    }
    segment_end(path, server_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(path: &str, format: PathFormat, root: &str) {
        let parsed = classify(path);
        assert_eq!(parsed.format, format, "format of {path:?}");
        assert_eq!(parsed.root(path), root, "root of {path:?}");
        assert!(parsed.root_length <= path.len());
    }

    #[test]
    fn test_empty_is_relative() {
        let parsed = classify("");
        assert_eq!(parsed.format, PathFormat::Relative);
        assert_eq!(parsed.root_length, 0);
        assert!(parsed.is_relative);
    }

    #[test]
    fn test_drive_paths() {
        check(r"C:\", PathFormat::DriveAbsolute, r"C:\");
        check(r"c:\Windows", PathFormat::DriveAbsolute, r"c:\");
        check("C:/Windows", PathFormat::DriveAbsolute, "C:/");
        check("C:", PathFormat::DriveRelative, "C:");
        check("C:foo", PathFormat::DriveRelative, "C:");
        check(r"1:\foo", PathFormat::UnknownFormat, "");
    }

    #[test]
    fn test_relative_paths() {
        check("foo", PathFormat::Relative, "");
        check(r"foo\bar", PathFormat::Relative, "");
        check(r"\foo", PathFormat::Relative, r"\");
        check("/foo", PathFormat::Relative, "/");
        check(r"..\foo", PathFormat::Relative, "");
        assert!(classify(r"\foo").is_relative);
    }

    #[test]
    fn test_unc_paths() {
        check(r"\\Server\Share", PathFormat::UniformNamingConvention, r"\\Server\Share");
        check(
            r"\\Server\Share\dir",
            PathFormat::UniformNamingConvention,
            r"\\Server\Share\",
        );
        check(r"\\Server", PathFormat::UniformNamingConvention, r"\\Server");
        check(
            "//Server/Share/dir",
            PathFormat::UniformNamingConvention,
            "//Server/Share/",
        );
        assert!(!classify(r"\\Server\Share").is_relative);
    }

    #[test]
    fn test_unc_keeps_extra_leading_separators() {
        check(
            r"\\\\Server\Share\dir",
            PathFormat::UniformNamingConvention,
            r"\\\\Server\Share\",
        );
    }

    #[test]
    fn test_only_separators_is_unknown() {
        check(r"\\", PathFormat::UnknownFormat, r"\\");
        check(r"\\\", PathFormat::UnknownFormat, r"\\\");
    }

    #[test]
    fn test_extended_forms() {
        check(
            r"\\?\UNC\Server\Share\dir",
            PathFormat::UniformNamingConventionExtended,
            r"\\?\UNC\Server\Share\",
        );
        check(
            r"\\?\unc\Server\Share",
            PathFormat::UniformNamingConventionExtended,
            r"\\?\unc\Server\Share",
        );
        check(
            r"\\?\C:\Windows",
            PathFormat::VolumeAbsoluteExtended,
            r"\\?\C:\",
        );
        check(r"\\?\C:", PathFormat::VolumeAbsoluteExtended, r"\\?\C:");
        check(
            r"\\?\Volume{b75e2c83-0000-0000-0000-602f00000000}\Windows",
            PathFormat::VolumeAbsoluteExtended,
            r"\\?\Volume{b75e2c83-0000-0000-0000-602f00000000}\",
        );
        assert!(classify(r"\\?\C:\").format.is_extended());
    }

    #[test]
    fn test_device_forms() {
        check(r"\\.\C:\Windows", PathFormat::Device, r"\\.\C:\");
        check(r"\\.\PhysicalDrive0", PathFormat::Device, r"\\.\PhysicalDrive0");
        check(r"\\?\GLOBALROOT\Device", PathFormat::Device, r"\\?\GLOBALROOT\");
        assert!(classify(r"\\.\CON").is_device);
    }

    #[test]
    fn test_bare_prefixes_are_unknown() {
        check(r"\\?\", PathFormat::UnknownFormat, r"\\?\");
        check(r"\\.", PathFormat::UnknownFormat, r"\\.");
        check(r"\\?\UNC", PathFormat::UnknownFormat, r"\\?\UNC");
        check(r"\\?\UNC\", PathFormat::UnknownFormat, r"\\?\UNC\");
    }

    #[test]
    fn test_reserved_names() {
        for name in ["CON", "con", "PRN", "AUX", "NUL", "COM1", "LPT9"] {
            let parsed = classify(name);
            assert_eq!(parsed.format, PathFormat::Device, "{name}");
            assert_eq!(parsed.root_length, name.len());
            assert!(parsed.is_device);
            assert!(!parsed.is_relative);
        }
        let parsed = classify("CON:Alt");
        assert_eq!(parsed.format, PathFormat::Device);
        assert_eq!(parsed.root_length, 3);
        assert_eq!(classify("COM10").format, PathFormat::Relative);
        assert_eq!(classify("LPT0").format, PathFormat::Relative);
    }

    #[test]
    fn test_helpers() {
        assert!(is_extended(r"\\?\C:\"));
        assert!(!is_extended(r"\\.\C:\"));
        assert!(!is_extended("//?/C:/"));
        assert!(is_device(r"\\.\pipe\name"));
        assert!(is_device("NUL"));
        assert!(is_relative("C:foo"));
        assert!(!is_relative(r"C:\foo"));
        assert_eq!(get_root(r"\\?\UNC\s\x\y"), r"\\?\UNC\s\x\");
    }
}
