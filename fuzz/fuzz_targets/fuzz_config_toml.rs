#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing and plan derivation must never panic
        if let Ok(config) = toml::from_str::<deckpub::Config>(content) {
            let _ = config.publish_plan(std::path::Path::new("/tmp/deck"));
        }
    }
});
