//! Fuzz target for the CSV parser.
//!
//! The parser must never panic on malformed input, whatever the column
//! typing decides.

#![no_main]

use chromapipe::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    let _ = parser.parse_bytes(data);
});
