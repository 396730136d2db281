#![no_main]

use libfuzzer_sys::fuzz_target;
use osmbin_wire::chunked::{read_string, StringChunking};

// Fuzz target: chunked UTF-16 string parsing in both chunking modes.
fuzz_target!(|data: &[u8]| {
    let _ = read_string(&mut &data[..], StringChunking::Legacy);
    let _ = read_string(&mut &data[..], StringChunking::Contiguous);
});
