//! Separator and root manipulation helpers.

use std::borrow::Cow;

use super::classify::classify;
use super::types::{is_separator, PathFormat, SEPARATOR};

/// Whether `path` ends in either separator.
#[must_use]
pub fn ends_with_separator(path: &str) -> bool {
    path.ends_with(is_separator)
}

/// Append a backslash unless `path` already ends in a separator.
///
/// # Examples
///
/// ```
/// use winpath::path::add_trailing_separator;
///
/// assert_eq!(add_trailing_separator("C:"), r"C:\");
/// assert_eq!(add_trailing_separator(r"C:\"), r"C:\");
/// ```
#[must_use]
pub fn add_trailing_separator(path: &str) -> Cow<'_, str> {
    if ends_with_separator(path) {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}{SEPARATOR}"))
    }
}

/// Strip trailing separators, never eating into the root.
///
/// # Examples
///
/// ```
/// use winpath::path::remove_trailing_separators;
///
/// assert_eq!(remove_trailing_separators(r"C:\Windows\\"), r"C:\Windows");
/// assert_eq!(remove_trailing_separators(r"C:\"), r"C:\");
/// assert_eq!(remove_trailing_separators(r"\\?\C:\"), r"\\?\C:\");
/// ```
#[must_use]
pub fn remove_trailing_separators(path: &str) -> &str {
    let root_length = classify(path).root_length;
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.len() < root_length {
        &path[..root_length]
    } else {
        trimmed
    }
}

/// Join `base` and `tail` with exactly one separator.
///
/// A fully qualified `tail`, or one rooted with a leading separator,
/// replaces `base` entirely.
///
/// # Examples
///
/// ```
/// use winpath::path::combine;
///
/// assert_eq!(combine(r"C:\Users", "me"), r"C:\Users\me");
/// assert_eq!(combine(r"C:\Users\", r"me\docs"), r"C:\Users\me\docs");
/// assert_eq!(combine(r"C:\Users", r"D:\other"), r"D:\other");
/// assert_eq!(combine(r"C:\Users", ""), r"C:\Users");
/// ```
#[must_use]
pub fn combine(base: &str, tail: &str) -> String {
    if tail.is_empty() {
        return base.to_string();
    }
    if base.is_empty() || !is_joinable(tail) {
        return tail.to_string();
    }
    if ends_with_separator(base) {
        format!("{base}{tail}")
    } else {
        format!("{base}{SEPARATOR}{tail}")
    }
}

/// Swap the root of `path` for `new_root`.
///
/// The remainder of `path` is appended to `new_root` with exactly one
/// separator between them.
///
/// # Examples
///
/// ```
/// use winpath::path::replace_root;
///
/// assert_eq!(
///     replace_root(r"\\?\Volume{1234}\", r"C:\Windows\System32"),
///     r"\\?\Volume{1234}\Windows\System32"
/// );
/// assert_eq!(replace_root(r"D:\", r"C:\"), r"D:\");
/// ```
#[must_use]
pub fn replace_root(new_root: &str, path: &str) -> String {
    let parsed = classify(path);
    let remainder = path[parsed.root_length..].trim_start_matches(is_separator);
    combine(new_root, remainder)
}

fn is_joinable(tail: &str) -> bool {
    let parsed = classify(tail);
    parsed.format == PathFormat::Relative && parsed.root_length == 0
}
