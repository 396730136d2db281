#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: FrameHeader::read_from frame header parsing.
//
// Catches bugs in:
// - Varint overflow in count/content_len
// - Truncated headers
fuzz_target!(|data: &[u8]| {
    let _ = osmbin_wire::block_frame::FrameHeader::read_from(&mut &data[..]);
});
