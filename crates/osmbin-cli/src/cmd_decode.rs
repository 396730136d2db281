/// Implementation of `osmbin decode`.
///
/// Writes each accepted record as one JSON object per line, in the same
/// shape `encode` accepts inside its `entities` array.
use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use osmbin_stream::OsmStreamSource;

use crate::DecodeArgs;
use crate::input::InputSource;
use crate::json::JsonEntity;

/// Run the `osmbin decode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read, a record fails to decode,
/// or the output cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let mut source = InputSource::open(&args.file, args.format, args.chunking.codec())?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    for geo in source.records(args.filter.filter()) {
        let geo = geo.with_context(|| format!("failed to read {}", args.file.display()))?;
        serde_json::to_writer(&mut out, &JsonEntity::from(&geo))?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
