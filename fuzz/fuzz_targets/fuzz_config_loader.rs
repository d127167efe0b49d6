#![no_main]

use std::path::Path;

use docs2schema::config::loader::parse_config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml) = std::str::from_utf8(data) {
        if let Ok(config) = parse_config(yaml, Path::new("fuzz.yaml")) {
            let _ = config.validate();
        }
    }
});
