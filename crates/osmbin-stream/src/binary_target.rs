use std::io::Write;

use osmbin_encoder::{append_node, append_relation, append_way};
use osmbin_types::{Node, OsmGeo, Relation, Way};
use osmbin_wire::CodecConfig;

use crate::error::StreamError;

/// Receives entities one at a time.
pub trait OsmStreamTarget {
    fn initialize(&mut self) -> Result<(), StreamError> {
        Ok(())
    }

    fn add_node(&mut self, node: &Node) -> Result<(), StreamError>;

    fn add_way(&mut self, way: &Way) -> Result<(), StreamError>;

    fn add_relation(&mut self, relation: &Relation) -> Result<(), StreamError>;

    fn add(&mut self, geo: &OsmGeo) -> Result<(), StreamError> {
        match geo {
            OsmGeo::Node(node) => self.add_node(node),
            OsmGeo::Way(way) => self.add_way(way),
            OsmGeo::Relation(relation) => self.add_relation(relation),
        }
    }

    /// Called once after the last entity.
    fn finalize(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}

/// Writes flat records straight to a writer.
///
/// Each `add_*` is one encoder call; nothing is held back between calls.
/// Wrap the writer in a `BufWriter` for file output.
pub struct BinaryStreamTarget<W> {
    writer: W,
    config: CodecConfig,
    bytes_written: u64,
    records_written: u64,
}

impl<W: Write> BinaryStreamTarget<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, CodecConfig::default())
    }

    pub fn with_config(writer: W, config: CodecConfig) -> Self {
        Self {
            writer,
            config,
            bytes_written: 0,
            records_written: 0,
        }
    }

    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn track(&mut self, size: usize) {
        self.bytes_written += size as u64;
        self.records_written += 1;
    }
}

impl<W: Write> OsmStreamTarget for BinaryStreamTarget<W> {
    fn add_node(&mut self, node: &Node) -> Result<(), StreamError> {
        let size = append_node(&mut self.writer, node, &self.config)?;
        self.track(size);
        Ok(())
    }

    fn add_way(&mut self, way: &Way) -> Result<(), StreamError> {
        let size = append_way(&mut self.writer, way, &self.config)?;
        self.track(size);
        Ok(())
    }

    fn add_relation(&mut self, relation: &Relation) -> Result<(), StreamError> {
        let size = append_relation(&mut self.writer, relation, &self.config)?;
        self.track(size);
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), StreamError> {
        self.writer.flush()?;
        Ok(())
    }
}
