#![no_main]

use docs2schema::schema::Generator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(markdown) = std::str::from_utf8(data) {
        let generator = Generator {
            collect_errors: true,
            ..Generator::default()
        };
        if let Ok(document) = generator.generate(markdown.split_inclusive('\n')) {
            let json = document.to_json_pretty().unwrap();
            let _: serde_json::Value = serde_json::from_str(&json).unwrap();
        }
    }
});
