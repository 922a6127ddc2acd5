//! Property-based tests for path handling.

use super::*;
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => "[a-z0-9_]{1,8}".prop_filter("reserved device name", |s| {
            reserved_device_name(s).is_none()
        }),
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

// Segments the final-segment rules treat specially: trailing spaces and
// dots, dot runs and space-dot runs.
fn dotted_segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => segment_strategy(),
        2 => "[a-z]{1,4}[ .]{1,3}",
        1 => "[ .]{1,4}",
        1 => Just("...".to_string()),
    ]
}

fn drive_path_strategy() -> impl Strategy<Value = String> {
    (
        "[A-Z]",
        prop::collection::vec(dotted_segment_strategy(), 0..10),
        any::<bool>(),
    )
        .prop_map(|(drive, segments, trailing)| {
            let mut path = format!("{drive}:\\{}", segments.join("\\"));
            if trailing && !segments.is_empty() {
                path.push('\\');
            }
            path
        })
}

fn unc_path_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z]{1,8}",
        "[a-z]{1,8}",
        prop::collection::vec(dotted_segment_strategy(), 0..6),
    )
        .prop_map(|(server, share, segments)| {
            let mut path = format!(r"\\{server}\{share}");
            for segment in segments {
                path.push('\\');
                path.push_str(&segment);
            }
            path
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // canonicalize(canonicalize(p)) == canonicalize(p)
    #[test]
    fn canonicalize_is_idempotent(path in prop_oneof![drive_path_strategy(), unc_path_strategy()]) {
        let once = canonicalize(&path);
        prop_assert_eq!(canonicalize(&once), once);
    }

    // Dot segments never survive in an absolute path.
    #[test]
    fn canonical_drive_paths_have_no_dot_segments(path in drive_path_strategy()) {
        let canonical = canonicalize(&path);
        prop_assert!(canonical.starts_with(&path[..3]));
        for segment in canonical[3..].split('\\') {
            prop_assert!(segment != "." && segment != "..", "{} from {}", canonical, path);
        }
    }

    // The UNC root never pops.
    #[test]
    fn canonical_unc_keeps_share(path in unc_path_strategy()) {
        let canonical = canonicalize(&path);
        let root = classify(&path).root(&path).trim_end_matches('\\').to_string();
        prop_assert!(canonical.starts_with(&root), "{} from {}", canonical, path);
    }

    // Removing an added prefix gives the path back.
    #[test]
    fn extended_prefix_round_trip(path in prop_oneof![drive_path_strategy(), unc_path_strategy()]) {
        let extended = add_extended_prefix(&path, true);
        prop_assert!(is_extended(&extended));
        prop_assert_eq!(remove_extended_prefix(&extended), path);
    }

    // The root is a prefix of the path.
    #[test]
    fn root_length_within_path(path in r"[a-zA-Z:?.\\/ ]{0,24}") {
        let parsed = classify(&path);
        prop_assert!(parsed.root_length <= path.len());
        prop_assert!(path.is_char_boundary(parsed.root_length));
    }

    // Full paths are never relative.
    #[test]
    fn full_path_is_fully_qualified(path in prop::collection::vec(segment_strategy(), 1..6)) {
        let dirs = CurrentDirectories::new(r"C:\base\dir").unwrap();
        let resolved = full_path(&path.join("\\"), &dirs).unwrap();
        prop_assert_eq!(classify(&resolved).format, PathFormat::DriveAbsolute);
    }
}
