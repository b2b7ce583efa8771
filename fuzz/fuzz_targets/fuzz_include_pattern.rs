#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // First line is the glob, the rest the saved file
        let (pattern, file) = content.split_once('\n').unwrap_or((content, "src/a.ts"));
        let file = Path::new("/ws").join(file);
        let _ = onsave::should_compile(&file, Path::new("/ws"), &[pattern]);
    }
});
