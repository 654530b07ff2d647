#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic; rejection is fine. A cleaned code that came
        // out of validation has to validate again.
        if let Ok(cleaned) = fattura::fiscale::validate_codice_fiscale(s) {
            assert!(fattura::fiscale::validate_codice_fiscale(&cleaned).is_ok());
        }
    }
});
