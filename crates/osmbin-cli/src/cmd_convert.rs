/// Implementation of `osmbin convert`.
///
/// Streams every accepted record from the input into a new file in the
/// requested layout. Nothing is buffered beyond one block.
use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use log::info;
use osmbin_stream::{
    BinaryStreamTarget, BlockStreamTarget, BlockWriterConfig, OsmStreamTarget, PumpStats, pump,
};

use crate::ConvertArgs;
use crate::input::{Format, InputSource};

/// Run the `osmbin convert` command.
///
/// # Errors
///
/// Returns an error if either file cannot be opened, a record fails to
/// decode, or the output cannot be written.
pub fn run(args: &ConvertArgs) -> Result<()> {
    let codec = args.chunking.codec();
    let mut source = InputSource::open(&args.input, args.from, codec)?;
    let out = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    let writer = BufWriter::new(out);

    let mut target: Box<dyn OsmStreamTarget> = match args.to {
        Format::Flat => Box::new(BinaryStreamTarget::with_config(writer, codec)),
        Format::Block => Box::new(BlockStreamTarget::with_config(
            writer,
            BlockWriterConfig {
                max_records: args.block_size,
                compress: args.compress,
                codec,
                ..BlockWriterConfig::default()
            },
        )),
    };

    let stats: PumpStats = pump(&mut source, target.as_mut(), args.filter.filter())
        .with_context(|| {
            format!(
                "failed converting {} to {}",
                args.input.display(),
                args.output.display()
            )
        })?;

    let output = args.output.display().to_string();
    info!(
        output = output.as_str(),
        nodes = stats.nodes,
        ways = stats.ways,
        relations = stats.relations;
        "conversion finished"
    );
    println!("Wrote {} records to {output}", stats.total());
    Ok(())
}
