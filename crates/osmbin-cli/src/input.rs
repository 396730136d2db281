//! Shared argument types and input opening.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use osmbin_stream::{
    BinaryStreamSource, BlockReaderConfig, Filter, FramedBlockDecoder, FramedStreamSource,
    OsmStreamSource, Seekable, StreamError,
};
use osmbin_types::OsmGeo;
use osmbin_wire::{CodecConfig, StringChunking};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Flat records back to back.
    Flat,
    /// Framed blocks of flat records.
    Block,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Chunking {
    /// Compatible with existing files; strings of 255+ bytes are cut.
    Legacy,
    /// Lossless long strings.
    Contiguous,
}

impl Chunking {
    pub fn codec(self) -> CodecConfig {
        CodecConfig {
            chunking: match self {
                Self::Legacy => StringChunking::Legacy,
                Self::Contiguous => StringChunking::Contiguous,
            },
        }
    }
}

#[derive(clap::Args, Clone, Copy, Debug)]
pub struct FilterArgs {
    /// Suppress nodes.
    #[arg(long)]
    pub skip_nodes: bool,

    /// Suppress ways.
    #[arg(long)]
    pub skip_ways: bool,

    /// Suppress relations.
    #[arg(long)]
    pub skip_relations: bool,
}

impl FilterArgs {
    pub fn filter(self) -> Filter {
        Filter {
            ignore_nodes: self.skip_nodes,
            ignore_ways: self.skip_ways,
            ignore_relations: self.skip_relations,
        }
    }
}

type FileSource = Seekable<BufReader<File>>;

/// An opened input file in either layout.
pub enum InputSource {
    Flat(BinaryStreamSource<FileSource>),
    Block(FramedStreamSource<FileSource>),
}

impl InputSource {
    pub fn open(path: &Path, format: Format, codec: CodecConfig) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let source = Seekable::new(BufReader::new(file))
            .with_context(|| format!("cannot seek in {}", path.display()))?;

        Ok(match format {
            Format::Flat => Self::Flat(BinaryStreamSource::with_config(source, codec)),
            Format::Block => {
                let config = BlockReaderConfig {
                    codec,
                    ..BlockReaderConfig::default()
                };
                Self::Block(FramedStreamSource::new(FramedBlockDecoder::with_config(
                    source, config,
                )))
            }
        })
    }

    pub fn first_way_offset(&self) -> Option<u64> {
        match self {
            Self::Flat(s) => s.first_way_offset(),
            Self::Block(s) => s.first_way_offset(),
        }
    }

    pub fn first_relation_offset(&self) -> Option<u64> {
        match self {
            Self::Flat(s) => s.first_relation_offset(),
            Self::Block(s) => s.first_relation_offset(),
        }
    }
}

impl OsmStreamSource for InputSource {
    fn move_next(&mut self, filter: Filter) -> Result<bool, StreamError> {
        match self {
            Self::Flat(s) => s.move_next(filter),
            Self::Block(s) => s.move_next(filter),
        }
    }

    fn current(&self) -> Option<&OsmGeo> {
        match self {
            Self::Flat(s) => s.current(),
            Self::Block(s) => s.current(),
        }
    }

    fn can_reset(&self) -> bool {
        match self {
            Self::Flat(s) => s.can_reset(),
            Self::Block(s) => s.can_reset(),
        }
    }

    fn reset(&mut self) -> Result<(), StreamError> {
        match self {
            Self::Flat(s) => s.reset(),
            Self::Block(s) => s.reset(),
        }
    }
}
