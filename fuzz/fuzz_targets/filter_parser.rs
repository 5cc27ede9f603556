#![no_main]

use libfuzzer_sys::fuzz_target;
use opcost::filter::OperationFilter;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must not panic; a parsed filter must answer for any name
        if let Ok(filter) = OperationFilter::from_expr(input) {
            let _ = filter.matches(input);
            let _ = filter.matches("ADD");
        }
    }
});
