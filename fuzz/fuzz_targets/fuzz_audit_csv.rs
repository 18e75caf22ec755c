//! Fuzz target for the column audit CSV parser.
//!
//! Goal: parsing should **never panic**. Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_audit_csv
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = maskguard_repo::fuzz::parse_audit(text);
    }
});
