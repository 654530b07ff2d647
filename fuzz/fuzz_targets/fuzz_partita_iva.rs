#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic; rejection is fine. A cleaned number that came
        // out of validation has to validate again.
        if let Ok(cleaned) = fattura::fiscale::validate_partita_iva(s) {
            assert!(fattura::fiscale::validate_partita_iva(&cleaned).is_ok());
        }
    }
});
