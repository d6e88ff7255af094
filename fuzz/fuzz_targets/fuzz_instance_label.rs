#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(label) = std::str::from_utf8(data) {
        if let Ok(label) = deckpub::InstanceLabel::new(label) {
            // Accepted labels never escape the single quotes of a remote command
            assert!(!label.as_str().contains('\''));
            assert!(!label.as_str().contains('/'));
        }
    }
});
