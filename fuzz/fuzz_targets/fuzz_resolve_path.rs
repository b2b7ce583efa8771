#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use onsave::{resolve_output_path, OutputLayout};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let mut parts = content.splitn(4, '\n');
        let file = parts.next().unwrap_or_default();
        let src_dir = parts.next().unwrap_or_default();
        let out_dir = parts.next().unwrap_or_default();
        let out_ext = parts.next().unwrap_or(".js");

        let layout = OutputLayout { src_dir, out_dir, out_ext };
        let _ = resolve_output_path(&Path::new("/ws").join(file), Path::new("/ws"), layout);
    }
});
