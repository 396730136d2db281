/// Implementation of `osmbin encode`.
///
/// Parses a JSON manifest and writes its entities as flat records, in
/// manifest order.
///
/// # Manifest format
///
/// ```json
/// {
///   "entities": [
///     { "type": "node", "id": 1, "lat": 50.8, "lon": 4.35,
///       "tags": [{ "k": "amenity", "v": "bench" }] },
///     { "type": "way", "id": 10, "nodes": [1, 2] },
///     { "type": "relation", "id": 20,
///       "members": [{ "type": "way", "ref": 10, "role": "outer" }] }
///   ]
/// }
/// ```
use std::fs::{self, File};
use std::io::BufWriter;

use anyhow::{Context, Result};
use log::info;
use osmbin_stream::{BinaryStreamTarget, OsmStreamTarget};

use crate::EncodeArgs;
use crate::json::Manifest;

/// Run the `osmbin encode` command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, an entity
/// has an unknown type, or the output cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let manifest_src = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let manifest: Manifest = serde_json::from_str(&manifest_src)
        .with_context(|| format!("failed to parse manifest {}", args.input.display()))?;

    let out = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    let mut target = BinaryStreamTarget::with_config(BufWriter::new(out), args.chunking.codec());

    target.initialize()?;
    for (idx, entity) in manifest.entities.into_iter().enumerate() {
        let geo = entity
            .into_osm_geo()
            .with_context(|| format!("entity {idx}: invalid"))?;
        target
            .add(&geo)
            .with_context(|| format!("entity {idx}: failed to encode"))?;
    }
    target.finalize()?;

    info!(
        records = target.records_written(),
        bytes = target.bytes_written();
        "manifest encoded"
    );
    println!(
        "Wrote {} bytes to {}",
        target.bytes_written(),
        args.output.display()
    );
    Ok(())
}
