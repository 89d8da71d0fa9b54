#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic. Errors are fine, panics are bugs.
        if let Ok(document) = taxsum::json::document_from_json(s) {
            if let Ok(summary) = taxsum::core::InclusiveTaxCalculator::new(&document).summarize() {
                let _ = summary.tax_collection().totals_by_key();
                let _ = summary.tax_collection().total();
            }
        }
    }
});
