#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use osmbin_stream::{BinaryStreamSource, Filter, OsmStreamSource, Seekable};
use osmbin_types::OsmGeoType;

// Fuzz target: the flat source over arbitrary bytes, twice.
//
// The first byte picks the filter. The second pass runs after a reset,
// with whatever skip-ahead offsets the first pass learned, so seeks land
// on arbitrary record boundaries of unsorted input.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };
    let mut filter = Filter::ACCEPT_ALL;
    for (bit, geo_type) in OsmGeoType::ALL.into_iter().enumerate() {
        if selector & (1 << bit) != 0 {
            filter = filter.ignoring(geo_type);
        }
    }

    let Ok(input) = Seekable::new(Cursor::new(body)) else {
        return;
    };
    let mut source = BinaryStreamSource::new(input);
    for _pass in 0..2 {
        for record in source.records(filter) {
            if record.is_err() {
                break;
            }
        }
        source.reset().unwrap();
    }
});
