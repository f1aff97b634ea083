//! Fuzz target for viewer config parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pairview::config::Config;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = Config::fuzz_parse(data);
});
