//! Lexical canonicalization matching the OS full-path rules.
//!
//! The path is split into a root that `..` can never remove and a list of
//! segments. Empty segments collapse, `.` drops and `..` pops. Only the
//! final segment gets the trailing space and dot treatment.

use std::borrow::Cow;

use super::classify::{classify, reserved_device_name};
use super::types::{PathFormat, ParsedPath, ALT_SEPARATOR, DEVICE_PREFIX, SEPARATOR};

/// Canonicalize `path` the way the OS full-path parser does, without
/// consulting any current directory.
///
/// - Forward slashes become backslashes.
/// - A bare reserved device name becomes `\\.\NAME`; a `:suffix` is
///   dropped.
/// - `.` and `..` segments collapse, never crossing above the root.
///   Relative paths keep unmatched `..` segments.
/// - The final segment loses trailing spaces and dots, except for runs of
///   three or more dots and dot/space runs in which a space precedes a dot.
///   A final `.` or `..` also removes the separator before it, and the
///   segment it exposes is treated as the final one.
/// - A relative result that would read back as a drive or device path is
///   kept relative with a leading `.\`.
/// - Segments followed by a separator are kept literally.
///
/// Canonicalizing an already canonical path returns it unchanged.
///
/// # Examples
///
/// ```
/// use winpath::path::canonicalize;
///
/// assert_eq!(canonicalize(r"C:\A\B\.\..\C"), r"C:\A\C");
/// assert_eq!(canonicalize(r"C:\..."), r"C:\...");
/// assert_eq!(canonicalize(r"C:\ ..\"), r"C:\ ..\");
/// assert_eq!(canonicalize("CON:Alt"), r"\\.\CON");
/// assert_eq!(canonicalize("//Server/Share/dir/"), r"\\Server\Share\dir\");
/// assert_eq!(canonicalize(r"\\?\C:\.."), r"\\?\");
/// ```
#[must_use]
pub fn canonicalize(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    if let Some(name) = reserved_device_name(path) {
        return format!("{DEVICE_PREFIX}{name}");
    }

    let normalized = path.replace(ALT_SEPARATOR, "\\");
    let parsed = classify(&normalized);
    match split_fixed_root(&normalized, parsed) {
        Some((root, rest)) => resolve(&root, rest),
        None => normalized,
    }
}

/// Part of a path that `..` cannot remove.
#[derive(Debug)]
struct FixedRoot<'a> {
    text: Cow<'a, str>,
    // Segments are joined to the root with a separator.
    separated: bool,
    // Unmatched `..` segments are kept instead of being floored.
    keeps_parents: bool,
}

impl<'a> FixedRoot<'a> {
    fn absolute(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: text.into(),
            separated: true,
            keeps_parents: false,
        }
    }

    fn relative(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            separated: false,
            keeps_parents: true,
        }
    }
}

fn split_fixed_root(path: &str, parsed: ParsedPath) -> Option<(FixedRoot<'_>, &str)> {
    let split = match parsed.format {
        PathFormat::UnknownFormat => return None,
        PathFormat::DriveAbsolute => (FixedRoot::absolute(&path[..3]), &path[3..]),
        PathFormat::DriveRelative => (FixedRoot::relative(&path[..2]), &path[2..]),
        PathFormat::Relative if parsed.root_length == 1 => {
            (FixedRoot::absolute(&path[..1]), &path[1..])
        }
        PathFormat::Relative => (FixedRoot::relative(""), path),
        PathFormat::Device
        | PathFormat::UniformNamingConventionExtended
        | PathFormat::VolumeAbsoluteExtended => (FixedRoot::absolute(&path[..4]), &path[4..]),
        PathFormat::UniformNamingConvention => split_unc_root(path),
    };
    Some(split)
}

// Two separators root at `\\server\share`; three or more root at exactly
// `\\\server`.
fn split_unc_root(path: &str) -> (FixedRoot<'_>, &str) {
    let leading = path.bytes().take_while(|&b| b == b'\\').count();
    let after = &path[leading..];
    let server_len = after.find(SEPARATOR).unwrap_or(after.len());

    if leading >= 3 {
        let root = format!(r"\\\{}", &after[..server_len]);
        return (FixedRoot::absolute(root), &after[server_len..]);
    }

    let server_end = leading + server_len;
    if server_end == path.len() {
        return (FixedRoot::absolute(path), "");
    }

    let share_start = server_end + 1;
    let share_len = path[share_start..]
        .find(SEPARATOR)
        .unwrap_or(path.len() - share_start);
    if share_len == 0 {
        return (
            FixedRoot::absolute(&path[..share_start]),
            &path[share_start..],
        );
    }

    let share_end = share_start + share_len;
    (FixedRoot::absolute(&path[..share_end]), &path[share_end..])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
    Bare,
    Separator,
}

/// What happens to the last segment when nothing follows it.
#[derive(Debug, PartialEq, Eq)]
enum FinalSegment<'a> {
    Literal(&'a str),
    Trimmed(&'a str),
    Vanished,
}

fn classify_final_segment(segment: &str) -> FinalSegment<'_> {
    let only_dots = segment.bytes().all(|b| b == b'.');
    if only_dots && segment.len() >= 3 {
        return FinalSegment::Literal(segment);
    }

    let only_dots_and_spaces = segment.bytes().all(|b| b == b'.' || b == b' ');
    if only_dots_and_spaces && segment.contains(" .") {
        return FinalSegment::Literal(segment);
    }

    let trimmed = segment.trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        FinalSegment::Vanished
    } else {
        FinalSegment::Trimmed(trimmed)
    }
}

fn pop_segment<'a>(stack: &mut Vec<&'a str>, keeps_parents: bool) {
    match stack.last() {
        Some(&last) if last != ".." => {
            stack.pop();
        }
        _ if keeps_parents => stack.push(".."),
        _ => {}
    }
}

fn resolve(root: &FixedRoot<'_>, rest: &str) -> String {
    let pieces: Vec<&str> = rest.split(SEPARATOR).collect();
    let last_index = pieces.len() - 1;
    let mut tail = if !rest.is_empty() && rest.ends_with(SEPARATOR) {
        Tail::Separator
    } else {
        Tail::Bare
    };

    let mut stack: Vec<&str> = Vec::with_capacity(pieces.len());
    for (index, &segment) in pieces.iter().enumerate() {
        let is_final = index == last_index;
        match segment {
            "" | "." => {}
            ".." => pop_segment(&mut stack, root.keeps_parents),
            _ if !is_final => stack.push(segment),
            _ => match classify_final_segment(segment) {
                FinalSegment::Literal(kept) | FinalSegment::Trimmed(kept) => stack.push(kept),
                FinalSegment::Vanished => tail = Tail::Separator,
            },
        }
    }

    // A final `.` or `..` takes the separator in front of it, which turns
    // the segment before it into the final one.
    if tail == Tail::Bare && matches!(pieces[last_index], "." | "..") {
        settle_final_segment(&mut stack, &mut tail);
    }

    let body = stack.join("\\");
    let mut out = root.text.to_string();
    if !body.is_empty() {
        if root.separated && !out.ends_with(SEPARATOR) {
            out.push(SEPARATOR);
        }
        out.push_str(&body);
    }
    if tail == Tail::Separator
        && (!body.is_empty() || root.separated)
        && !out.ends_with(SEPARATOR)
    {
        out.push(SEPARATOR);
    }

    if out.is_empty() {
        out.push('.');
    } else if root.text.is_empty() && !root.separated && reparses_as_other_format(&out) {
        out.insert_str(0, r".\");
    }
    out
}

fn settle_final_segment(stack: &mut Vec<&str>, tail: &mut Tail) {
    let Some(&last) = stack.last() else {
        return;
    };
    // Unmatched parents of a relative path stay as they are.
    if last == ".." {
        return;
    }
    match classify_final_segment(last) {
        FinalSegment::Literal(_) => {}
        FinalSegment::Trimmed(kept) => {
            stack.pop();
            stack.push(kept);
        }
        FinalSegment::Vanished => {
            stack.pop();
            *tail = Tail::Separator;
        }
    }
}

// A relative result such as `C:x` or `CON` would read back as a drive or a
// device; `.\` keeps it relative.
fn reparses_as_other_format(relative: &str) -> bool {
    if reserved_device_name(relative).is_some() {
        return true;
    }
    let parsed = classify(relative);
    parsed.format != PathFormat::Relative || parsed.root_length != 0
}
