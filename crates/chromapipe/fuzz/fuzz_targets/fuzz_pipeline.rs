//! Fuzz target for the analysis steps.
//!
//! Whatever table the parser produces, normalization, statistics and the
//! regression fit must return without panicking.

#![no_main]

use chromapipe::{Parser, fit_linear_regression, normalize, summary_statistics};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let Ok(table) = Parser::new().parse_bytes(data) else {
        return;
    };

    let _ = normalize(&table);
    let _ = summary_statistics(&table);

    let names = table.column_names();
    if names.len() >= 2 {
        let _ = fit_linear_regression(&table, &names[0], &names[1]);
    }
});
