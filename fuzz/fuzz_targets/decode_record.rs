#![no_main]

use libfuzzer_sys::fuzz_target;
use osmbin_wire::CodecConfig;

// Fuzz target: read_osm_geo over arbitrary bytes, record after record.
//
// Catches bugs in:
// - Huge or negative tag, node, and member counts
// - Truncation inside any field
// - Invalid type codes and visible bytes
// - Odd-length and surrogate-splitting strings
fuzz_target!(|data: &[u8]| {
    for config in [CodecConfig::default(), CodecConfig::contiguous()] {
        let mut cursor = data;
        while let Ok(Some(_)) = osmbin_decoder::read_osm_geo(&mut cursor, &config) {}
    }
});
