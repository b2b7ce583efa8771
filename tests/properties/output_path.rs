//! Property tests for output path resolution.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use onsave::{resolve_output_path, OutputLayout};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn dir() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 0..=2).prop_map(|parts| parts.join("/"))
}

fn ext() -> impl Strategy<Value = String> {
    prop::sample::select(vec![".js", ".mjs", ".cjs", ".es5.js"]).prop_map(str::to_string)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a file under srcDir lands under outDir with the same
    /// relative directory and the configured extension.
    #[test]
    fn property_src_tree_is_mirrored(
        src_dir in dir(),
        out_dir in dir(),
        out_ext in ext(),
        nested in proptest::collection::vec(segment(), 0..=3),
        stem in segment(),
    ) {
        let root = Path::new("/ws");
        let mut rel = PathBuf::from(&src_dir);
        for part in &nested {
            rel.push(part);
        }
        rel.push(format!("{}.ts", stem));
        let file = root.join(&rel);

        let layout = OutputLayout { src_dir: &src_dir, out_dir: &out_dir, out_ext: &out_ext };
        let output = resolve_output_path(&file, root, layout);

        let mut expected = root.join(&out_dir);
        for part in &nested {
            expected.push(part);
        }
        expected.push(format!("{}{}", stem, out_ext));

        prop_assert_eq!(&output.code_path, &expected);
        prop_assert_eq!(
            output.map_path,
            PathBuf::from(format!("{}.map", expected.to_string_lossy()))
        );
    }

    /// PROPERTY: resolution is a pure function of its inputs.
    #[test]
    fn property_resolution_is_deterministic(
        src_dir in dir(),
        out_dir in dir(),
        rel in dir(),
        stem in segment(),
    ) {
        let root = Path::new("/ws");
        let file = root.join(&rel).join(format!("{}.tsx", stem));
        let layout = OutputLayout { src_dir: &src_dir, out_dir: &out_dir, out_ext: ".js" };

        prop_assert_eq!(
            resolve_output_path(&file, root, layout),
            resolve_output_path(&file, root, layout)
        );
    }

    /// PROPERTY: resolution never panics on arbitrary relative dirs.
    #[test]
    fn property_resolve_never_panics(
        src_dir in "[A-Za-z0-9./_-]{0,32}",
        out_dir in "[A-Za-z0-9./_-]{0,32}",
        file in "[A-Za-z0-9./_-]{0,64}",
    ) {
        let layout = OutputLayout { src_dir: &src_dir, out_dir: &out_dir, out_ext: ".js" };
        let _ = resolve_output_path(&Path::new("/ws").join(file), Path::new("/ws"), layout);
    }
}
