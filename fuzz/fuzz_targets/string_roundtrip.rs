#![no_main]

use libfuzzer_sys::fuzz_target;
use osmbin_wire::chunked::{read_string, write_string, StringChunking};

// Fuzz target: contiguous chunking is lossless for any non-blank string,
// and both modes agree on strings shorter than one full chunk.
fuzz_target!(|value: String| {
    let mut contiguous = Vec::new();
    write_string(&mut contiguous, &value, StringChunking::Contiguous).unwrap();
    let decoded = read_string(&mut contiguous.as_slice(), StringChunking::Contiguous).unwrap();

    if value.trim().is_empty() {
        assert_eq!(decoded, "");
    } else {
        assert_eq!(decoded, value);
    }

    if value.encode_utf16().count() < 127 {
        let mut legacy = Vec::new();
        write_string(&mut legacy, &value, StringChunking::Legacy).unwrap();
        assert_eq!(legacy, contiguous);
    }
});
