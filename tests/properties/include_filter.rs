//! Property tests for the include filter.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use onsave::should_compile;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn relative_file() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(segment(), 0..=4),
        segment(),
        prop::sample::select(vec!["js", "jsx", "ts", "tsx", "mjs", "json"]),
    )
        .prop_map(|(dirs, stem, ext)| {
            let mut parts = dirs;
            parts.push(format!("{}.{}", stem, ext));
            parts.join("/")
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: declaration files are never compiled, whatever the globs.
    #[test]
    fn property_declarations_never_compile(
        dirs in proptest::collection::vec(segment(), 0..=3),
        stem in segment(),
    ) {
        let mut rel = dirs.join("/");
        if !rel.is_empty() {
            rel.push('/');
        }
        rel.push_str(&format!("{}.d.ts", stem));
        let file = PathBuf::from("/ws").join(&rel);

        for patterns in [vec!["**/*"], vec!["**/*.ts"], vec![rel.as_str()]] {
            prop_assert!(!should_compile(&file, Path::new("/ws"), &patterns).unwrap());
        }
    }

    /// PROPERTY: an empty include list compiles nothing.
    #[test]
    fn property_empty_include_compiles_nothing(rel in relative_file()) {
        let file = PathBuf::from("/ws").join(rel);
        let none: [&str; 0] = [];
        prop_assert!(!should_compile(&file, Path::new("/ws"), &none).unwrap());
    }

    /// PROPERTY: `**/*` matches every non-declaration file under the root.
    #[test]
    fn property_recursive_glob_matches_everything(rel in relative_file()) {
        let file = PathBuf::from("/ws").join(rel);
        prop_assert!(should_compile(&file, Path::new("/ws"), &["**/*"]).unwrap());
    }

    /// PROPERTY: files outside the root never match root-relative globs.
    #[test]
    fn property_outside_root_never_matches(rel in relative_file()) {
        let file = PathBuf::from("/elsewhere").join(rel);
        prop_assert!(!should_compile(&file, Path::new("/ws"), &["**/*"]).unwrap());
    }

    /// PROPERTY: the filter never panics, even on malformed patterns.
    #[test]
    fn property_filter_never_panics(pattern in "(?s).{0,64}", rel in relative_file()) {
        let file = PathBuf::from("/ws").join(rel);
        let _ = should_compile(&file, Path::new("/ws"), &[pattern]);
    }
}
