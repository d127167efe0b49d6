#![no_main]

use docs2schema::schema::TypeTranslator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let translator = TypeTranslator::default();
        // Accepted notations must serialize and translate identically twice
        if let Ok(fragment) = translator.translate(input) {
            let _ = fragment.to_value();
            assert_eq!(translator.translate(input).ok(), Some(fragment));
        }
    }
});
