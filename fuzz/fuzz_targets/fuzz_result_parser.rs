#![no_main]

use libfuzzer_sys::fuzz_target;
use survey_adjust::parse_adjustment_result;

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        let _ = parse_adjustment_result(xml);
    }
});
