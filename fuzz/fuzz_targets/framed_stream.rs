#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use osmbin_stream::{
    BlockReaderConfig, BlockStreamSource, Filter, FramedBlockDecoder, OsmStreamSource, Seekable,
};
use osmbin_types::OsmGeoType;

// Fuzz target: the framed block source over arbitrary bytes.
//
// Catches bugs in:
// - Bodies shorter than content_len
// - Record counts that disagree with the body
// - Compressed bodies that are not zstd or expand past the limit
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
    let config = BlockReaderConfig {
        max_block_size: 64 * 1024,
        ..BlockReaderConfig::default()
    };
    let mut source = BlockStreamSource::new(FramedBlockDecoder::with_config(input, config));
    for record in source.records(filter) {
        if record.is_err() {
            break;
        }
    }
});
