//! Golden fixture generator for the osmbin conformance tests.
//!
//! Writes every fixture file under `tests/golden/`. Run it after a
//! deliberate wire-format change, then re-run the conformance tests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p osmbin-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File                             | Contents                              |
//! |----------------------------------|---------------------------------------|
//! | bench_node/records.osmbin        | One node, flat layout                 |
//! | sorted_extract/records.osmbin    | 3 nodes, 2 ways, 1 relation, flat     |
//! | sorted_extract/blocks.osmbin     | Same entities, one frame per kind     |

#![allow(clippy::pedantic)]

use std::path::Path;

use osmbin_encoder::append_osm_geo;
use osmbin_stream::{BlockStreamTarget, OsmStreamTarget};
use osmbin_tests::{bench_node, sorted_extract};
use osmbin_types::OsmGeo;
use osmbin_wire::CodecConfig;

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    write_fixture(
        &golden_dir,
        "bench_node/records.osmbin",
        &flat(&[bench_node()]),
    );
    write_fixture(
        &golden_dir,
        "sorted_extract/records.osmbin",
        &flat(&sorted_extract()),
    );
    write_fixture(
        &golden_dir,
        "sorted_extract/blocks.osmbin",
        &blocks(&sorted_extract()),
    );

    println!("All golden fixtures generated in {}", golden_dir.display());
}

fn flat(entities: &[OsmGeo]) -> Vec<u8> {
    let mut out = Vec::new();
    for geo in entities {
        append_osm_geo(&mut out, geo, &CodecConfig::default()).unwrap();
    }
    out
}

fn blocks(entities: &[OsmGeo]) -> Vec<u8> {
    let mut target = BlockStreamTarget::new(Vec::new());
    for geo in entities {
        target.add(geo).unwrap();
    }
    target.finalize().unwrap();
    target.into_inner()
}

fn write_fixture(base: &Path, relative: &str, bytes: &[u8]) {
    let path = base.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, bytes).unwrap();
    println!("  wrote {} ({} bytes)", path.display(), bytes.len());
}
