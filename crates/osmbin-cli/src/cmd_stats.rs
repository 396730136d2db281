/// Implementation of `osmbin stats`.
///
/// Reads the whole file once and reports what it holds.
///
/// # Example output
///
/// ```text
/// File:    /tmp/extract.osmbin  (48213 bytes, flat)
///
/// Kind          Count    Tags
/// ──────────────────────────────
/// node           1204     310
/// way             180     644
/// relation         12      57
/// ──────────────────────────────
/// Total          1396    1011
///
/// First way at byte 30112
/// First relation at byte 46820
/// ```
use std::fs;

use anyhow::{Context, Result};
use osmbin_stream::{Filter, OsmStreamSource};
use osmbin_types::OsmGeoType;

use crate::StatsArgs;
use crate::input::{Format, InputSource};

#[derive(Default)]
struct KindStats {
    count: u64,
    tags: u64,
}

/// Run the `osmbin stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a record fails to
/// decode.
pub fn run(args: &StatsArgs) -> Result<()> {
    let file_size = fs::metadata(&args.file)
        .with_context(|| format!("cannot stat {}", args.file.display()))?
        .len();
    let mut source = InputSource::open(&args.file, args.format, args.chunking.codec())?;

    let mut by_kind: [KindStats; 3] = Default::default();
    while source
        .move_next(Filter::ACCEPT_ALL)
        .with_context(|| format!("failed to read {}", args.file.display()))?
    {
        if let Some(geo) = source.current() {
            let slot = &mut by_kind[kind_index(geo.geo_type())];
            slot.count += 1;
            slot.tags += geo.common().tags.len() as u64;
        }
    }

    let layout = match args.format {
        Format::Flat => "flat",
        Format::Block => "block",
    };
    println!(
        "File:    {}  ({file_size} bytes, {layout})",
        args.file.display()
    );
    println!();
    println!("{:<12} {:>7} {:>7}", "Kind", "Count", "Tags");
    println!("{}", "─".repeat(30));
    for geo_type in OsmGeoType::ALL {
        let stats = &by_kind[kind_index(geo_type)];
        println!(
            "{:<12} {:>7} {:>7}",
            geo_type.as_str(),
            stats.count,
            stats.tags
        );
    }
    println!("{}", "─".repeat(30));
    println!(
        "{:<12} {:>7} {:>7}",
        "Total",
        by_kind.iter().map(|s| s.count).sum::<u64>(),
        by_kind.iter().map(|s| s.tags).sum::<u64>()
    );
    println!();

    match source.first_way_offset() {
        Some(offset) => println!("First way at byte {offset}"),
        None => println!("No ways"),
    }
    match source.first_relation_offset() {
        Some(offset) => println!("First relation at byte {offset}"),
        None => println!("No relations"),
    }
    Ok(())
}

fn kind_index(geo_type: OsmGeoType) -> usize {
    match geo_type {
        OsmGeoType::Node => 0,
        OsmGeoType::Way => 1,
        OsmGeoType::Relation => 2,
    }
}
