#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: varint decoding from a byte stream.
fuzz_target!(|data: &[u8]| {
    let _ = osmbin_wire::varint::read_varint(&mut &data[..], "fuzz");
});
