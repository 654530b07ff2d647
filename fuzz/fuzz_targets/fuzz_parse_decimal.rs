#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Arbitrary text as numeric input; must not panic.
        let _ = fattura::money::parse_decimal(s);
    }
});
