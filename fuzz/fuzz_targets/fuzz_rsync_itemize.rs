#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let stdout = String::from_utf8_lossy(data);
    let report = deckpub::infrastructure::sync::parse_itemized(&stdout);
    assert!(report.transferred.len() + report.deleted.len() <= stdout.lines().count());
});
