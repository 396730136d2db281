//! Framed block container.
//!
//! A stream of frames, each holding a run of flat records. The frame
//! header says which entity kinds the body contains, so a reader can step
//! over a body it has no use for without decoding it.
//!
//! ```text
//! ┌──────────────┬─────────┬────────────────────────────────────────┐
//! │ Field        │ Wire    │ Description                            │
//! ├──────────────┼─────────┼────────────────────────────────────────┤
//! │ kind         │ u8      │ 0x01 = primitive group                 │
//! │ flags        │ u8      │ has nodes / ways / relations, zstd     │
//! │ count        │ varint  │ records in the body                    │
//! │ content_len  │ varint  │ body length on the wire                │
//! │ body         │ [u8; N] │ flat records, optionally zstd          │
//! └──────────────┴─────────┴────────────────────────────────────────┘
//! ```
//!
//! There is no file header and no end marker. Frames of any other kind
//! are skipped.

use std::io::{Cursor, Read, Write};
use std::rc::Rc;

use log::{debug, trace};
use osmbin_decoder::{DecodeError, decompress, read_osm_geo};
use osmbin_encoder::{append_node, append_relation, append_way};
use osmbin_encoder::compression::compress;
use osmbin_types::{Node, OsmGeo, OsmGeoType, Relation, Way};
use osmbin_wire::WireError;
use osmbin_wire::block_frame::{FrameFlags, FrameHeader, frame_kind};

use crate::binary_target::OsmStreamTarget;
use crate::block_cache::{BlockReport, PrimitiveConsumer};
use crate::block_source::{BlockDecoder, BlockStreamSource};
use crate::byte_source::ByteSource;
use crate::config::{BlockReaderConfig, BlockWriterConfig};
use crate::error::StreamError;
use crate::filter::Filter;

/// A block source reading the framed container.
pub type FramedStreamSource<S> = BlockStreamSource<FramedBlockDecoder<S>>;

/// Per-frame context shared by the records decoded from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramedBlock {
    /// Offset of the frame header in the stream.
    pub offset: u64,
    pub record_count: u64,
    pub flags: FrameFlags,
}

fn frame_flag(geo_type: OsmGeoType) -> FrameFlags {
    match geo_type {
        OsmGeoType::Node => FrameFlags::HAS_NODES,
        OsmGeoType::Way => FrameFlags::HAS_WAYS,
        OsmGeoType::Relation => FrameFlags::HAS_RELATIONS,
    }
}

/// [`BlockDecoder`] for the framed container.
///
/// Records are decoded eagerly when a frame is read, so the queued
/// primitive is the finished entity.
pub struct FramedBlockDecoder<S> {
    source: S,
    config: BlockReaderConfig,
    frames_skipped: u64,
}

impl<S: ByteSource> FramedBlockDecoder<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, BlockReaderConfig::default())
    }

    pub fn with_config(source: S, config: BlockReaderConfig) -> Self {
        Self {
            source,
            config,
            frames_skipped: 0,
        }
    }

    /// Frames stepped over without decoding their body.
    #[must_use]
    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn read_body(&mut self, header: &FrameHeader, offset: u64) -> Result<Vec<u8>, StreamError> {
        let limit = self.config.max_block_size;
        let len = usize::try_from(header.content_len)
            .ok()
            .filter(|&len| len <= limit)
            .ok_or(StreamError::BlockTooLarge {
                size: header.content_len,
                offset,
                limit,
            })?;

        let mut body = vec![0u8; len];
        self.source
            .read_exact(&mut body)
            .map_err(|e| WireError::from_read(e, "frame body"))?;

        if header.flags.is_compressed() {
            Ok(decompress(&body, limit)?)
        } else {
            Ok(body)
        }
    }
}

impl<S: ByteSource> BlockDecoder for FramedBlockDecoder<S> {
    type Block = FramedBlock;
    type Primitive = OsmGeo;

    fn can_seek(&self) -> bool {
        self.source.can_seek()
    }

    fn position(&self) -> u64 {
        self.source.position()
    }

    fn seek_to(&mut self, position: u64) -> Result<(), StreamError> {
        self.source.seek_to(position)?;
        Ok(())
    }

    fn decode_next(
        &mut self,
        consumer: &mut dyn PrimitiveConsumer<FramedBlock, OsmGeo>,
        filter: Filter,
    ) -> Result<Option<BlockReport>, StreamError> {
        loop {
            let offset = self.source.position();
            let Some((header, _)) = FrameHeader::read_from(&mut self.source)? else {
                return Ok(None);
            };

            if header.kind != frame_kind::PRIMITIVES {
                debug!(kind = header.kind, offset = offset; "skipping unknown frame kind");
                self.source.skip(header.content_len)?;
                continue;
            }

            let flags = header.flags;
            let mut report = BlockReport {
                has_nodes: flags.has_nodes(),
                has_ways: flags.has_ways(),
                has_relations: flags.has_relations(),
                accepted: false,
            };
            let wanted = OsmGeoType::ALL
                .into_iter()
                .any(|t| report.has(t) && filter.accepts(t));

            if !wanted {
                trace!(offset = offset, len = header.content_len; "frame filtered, body skipped");
                self.source.skip(header.content_len)?;
                self.frames_skipped += 1;
                return Ok(Some(report));
            }

            let body = self.read_body(&header, offset)?;
            let block = Rc::new(FramedBlock {
                offset,
                record_count: header.count,
                flags,
            });

            let mut cursor = Cursor::new(body.as_slice());
            for _ in 0..header.count {
                let geo = read_osm_geo(&mut cursor, &self.config.codec)?.ok_or(
                    DecodeError::Truncated {
                        field: "block record",
                    },
                )?;
                let geo_type = geo.geo_type();
                report.accepted |= filter.accepts(geo_type);
                match geo_type {
                    OsmGeoType::Node => consumer.process_node(&block, geo),
                    OsmGeoType::Way => consumer.process_way(&block, geo),
                    OsmGeoType::Relation => consumer.process_relation(&block, geo),
                }
            }
            return Ok(Some(report));
        }
    }

    fn materialize(
        &self,
        _block: &FramedBlock,
        _kind: OsmGeoType,
        primitive: OsmGeo,
    ) -> Result<OsmGeo, StreamError> {
        Ok(primitive)
    }
}

/// Writes entities into framed blocks.
///
/// Records collect in an in-memory body until the block is closed, either
/// because it reached `max_records` or, with `split_on_type_change`, because
/// the next entity is of a different kind. Call
/// [`finalize`](OsmStreamTarget::finalize) to emit the last open block.
pub struct BlockStreamTarget<W> {
    writer: W,
    config: BlockWriterConfig,
    body: Vec<u8>,
    pending: u64,
    flags: FrameFlags,
    last_type: Option<OsmGeoType>,
    bytes_written: u64,
    blocks_written: u64,
    records_written: u64,
}

impl<W: Write> BlockStreamTarget<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, BlockWriterConfig::default())
    }

    pub fn with_config(writer: W, config: BlockWriterConfig) -> Self {
        Self {
            writer,
            config,
            body: Vec::new(),
            pending: 0,
            flags: FrameFlags::NONE,
            last_type: None,
            bytes_written: 0,
            blocks_written: 0,
            records_written: 0,
        }
    }

    /// Bytes emitted so far, frame headers included.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    #[must_use]
    pub fn blocks_written(&self) -> u64 {
        self.blocks_written
    }

    /// Records added so far, including those in the open block.
    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// The writer. Records in a block that was never flushed are lost.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Close the open block when a record of another type arrives.
    fn begin_record(&mut self, geo_type: OsmGeoType) -> Result<(), StreamError> {
        if self.config.split_on_type_change && self.last_type.is_some_and(|t| t != geo_type) {
            self.flush_block()?;
        }
        Ok(())
    }

    /// Account for a record already appended to the body.
    fn end_record(&mut self, geo_type: OsmGeoType) -> Result<(), StreamError> {
        self.pending += 1;
        self.records_written += 1;
        self.flags = self.flags.with(frame_flag(geo_type));
        self.last_type = Some(geo_type);

        if self.pending >= self.config.max_records.max(1) as u64 {
            self.flush_block()?;
        }
        Ok(())
    }

    fn flush_block(&mut self) -> Result<(), StreamError> {
        if self.pending == 0 {
            return Ok(());
        }

        let mut flags = self.flags;
        let compressed = if self.config.compress {
            compress(&self.body)
        } else {
            None
        };
        let body = match &compressed {
            Some(packed) => {
                flags = flags.with(FrameFlags::COMPRESSED);
                packed.as_slice()
            }
            None => self.body.as_slice(),
        };

        let header = FrameHeader {
            kind: frame_kind::PRIMITIVES,
            flags,
            count: self.pending,
            content_len: body.len() as u64,
        };
        let header_len = header.write_to(&mut self.writer)?;
        self.writer.write_all(body)?;
        trace!(
            records = self.pending,
            raw = self.body.len(),
            stored = body.len();
            "block written"
        );

        self.bytes_written += (header_len + body.len()) as u64;
        self.blocks_written += 1;
        self.body.clear();
        self.pending = 0;
        self.flags = FrameFlags::NONE;
        self.last_type = None;
        Ok(())
    }
}

impl<W: Write> OsmStreamTarget for BlockStreamTarget<W> {
    fn add_node(&mut self, node: &Node) -> Result<(), StreamError> {
        self.begin_record(OsmGeoType::Node)?;
        append_node(&mut self.body, node, &self.config.codec)?;
        self.end_record(OsmGeoType::Node)
    }

    fn add_way(&mut self, way: &Way) -> Result<(), StreamError> {
        self.begin_record(OsmGeoType::Way)?;
        append_way(&mut self.body, way, &self.config.codec)?;
        self.end_record(OsmGeoType::Way)
    }

    fn add_relation(&mut self, relation: &Relation) -> Result<(), StreamError> {
        self.begin_record(OsmGeoType::Relation)?;
        append_relation(&mut self.body, relation, &self.config.codec)?;
        self.end_record(OsmGeoType::Relation)
    }

    fn finalize(&mut self) -> Result<(), StreamError> {
        self.flush_block()?;
        self.writer.flush()?;
        debug!(
            blocks = self.blocks_written,
            records = self.records_written,
            bytes = self.bytes_written;
            "block stream finalized"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::{ForwardOnly, Seekable};
    use crate::source::OsmStreamSource;
    use osmbin_types::Common;

    fn entity(geo_type: OsmGeoType, id: i64) -> OsmGeo {
        let common = Common {
            id: Some(id),
            ..Common::default()
        };
        match geo_type {
            OsmGeoType::Node => Node {
                common,
                latitude: Some(50.0),
                longitude: Some(4.0),
            }
            .into(),
            OsmGeoType::Way => Way {
                common,
                nodes: vec![1, 2, 3],
            }
            .into(),
            OsmGeoType::Relation => Relation {
                common,
                ..Relation::default()
            }
            .into(),
        }
    }

    fn write_blocks(geos: &[OsmGeo], config: BlockWriterConfig) -> (Vec<u8>, u64) {
        let mut target = BlockStreamTarget::with_config(Vec::new(), config);
        for geo in geos {
            target.add(geo).unwrap();
        }
        target.finalize().unwrap();
        let blocks = target.blocks_written();
        (target.into_inner(), blocks)
    }

    fn sorted() -> Vec<OsmGeo> {
        let mut geos: Vec<OsmGeo> = (1..=5).map(|id| entity(OsmGeoType::Node, id)).collect();
        geos.extend((10..13).map(|id| entity(OsmGeoType::Way, id)));
        geos.push(entity(OsmGeoType::Relation, 20));
        geos
    }

    fn read_all(bytes: Vec<u8>, filter: Filter) -> Vec<OsmGeo> {
        let decoder = FramedBlockDecoder::new(Seekable::new(Cursor::new(bytes)).unwrap());
        let mut source = BlockStreamSource::new(decoder);
        source.records(filter).map(Result::unwrap).collect()
    }

    #[test]
    fn splits_on_type_change() {
        let (_, blocks) = write_blocks(&sorted(), BlockWriterConfig::default());
        assert_eq!(blocks, 3);
    }

    #[test]
    fn splits_on_max_records() {
        let config = BlockWriterConfig {
            max_records: 2,
            ..BlockWriterConfig::default()
        };
        // nodes 2+2+1, ways 2+1, relation 1
        let (_, blocks) = write_blocks(&sorted(), config);
        assert_eq!(blocks, 6);
    }

    #[test]
    fn roundtrips_through_blocks() {
        let geos = sorted();
        let (bytes, _) = write_blocks(&geos, BlockWriterConfig::default());
        assert_eq!(read_all(bytes, Filter::ACCEPT_ALL), geos);
    }

    #[test]
    fn compressed_blocks_decode_identically() {
        let geos: Vec<OsmGeo> = (0..200).map(|id| entity(OsmGeoType::Way, id)).collect();
        let config = BlockWriterConfig {
            compress: true,
            ..BlockWriterConfig::default()
        };
        let (packed, _) = write_blocks(&geos, config);
        let (plain, _) = write_blocks(&geos, BlockWriterConfig::default());
        assert!(packed.len() < plain.len());
        assert_eq!(read_all(packed, Filter::ACCEPT_ALL), geos);
    }

    #[test]
    fn filtered_frames_are_not_decoded() {
        let (bytes, _) = write_blocks(&sorted(), BlockWriterConfig::default());
        let decoder = FramedBlockDecoder::new(Seekable::new(Cursor::new(bytes)).unwrap());
        let mut source = BlockStreamSource::new(decoder);
        let only_relations = Filter::ACCEPT_ALL
            .ignoring(OsmGeoType::Node)
            .ignoring(OsmGeoType::Way);

        let ids: Vec<_> = source
            .records(only_relations)
            .map(|r| r.unwrap().id().unwrap())
            .collect();
        assert_eq!(ids, [20]);
        assert_eq!(source.decoder().frames_skipped(), 2);
        assert!(source.first_way_offset().is_some());
    }

    #[test]
    fn forward_only_input_skips_by_reading() {
        let (bytes, _) = write_blocks(&sorted(), BlockWriterConfig::default());
        let decoder = FramedBlockDecoder::new(ForwardOnly::new(bytes.as_slice()));
        let mut source = BlockStreamSource::new(decoder);
        let no_nodes = Filter::ACCEPT_ALL.ignoring(OsmGeoType::Node);
        let ids: Vec<_> = source
            .records(no_nodes)
            .map(|r| r.unwrap().id().unwrap())
            .collect();
        assert_eq!(ids, [10, 11, 12, 20]);
        assert_eq!(source.decoder().frames_skipped(), 1);
    }

    #[test]
    fn unknown_frame_kinds_are_ignored() {
        let mut bytes = Vec::new();
        FrameHeader {
            kind: 0x7E,
            flags: FrameFlags::NONE,
            count: 0,
            content_len: 3,
        }
        .write_to(&mut bytes)
        .unwrap();
        bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
        let (frames, _) = write_blocks(&sorted()[..1], BlockWriterConfig::default());
        bytes.extend_from_slice(&frames);

        let geos = read_all(bytes, Filter::ACCEPT_ALL);
        assert_eq!(geos.len(), 1);
        assert_eq!(geos[0].id(), Some(1));
    }

    #[test]
    fn oversized_body_is_rejected() {
        let (bytes, _) = write_blocks(&sorted(), BlockWriterConfig::default());
        let config = BlockReaderConfig {
            max_block_size: 8,
            ..BlockReaderConfig::default()
        };
        let decoder =
            FramedBlockDecoder::with_config(Seekable::new(Cursor::new(bytes)).unwrap(), config);
        let mut source = BlockStreamSource::new(decoder);
        assert!(matches!(
            source.move_next(Filter::ACCEPT_ALL),
            Err(StreamError::BlockTooLarge { offset: 0, .. })
        ));
    }

    #[test]
    fn short_body_fails_as_truncated() {
        let (mut bytes, _) = write_blocks(&sorted()[..2], BlockWriterConfig::default());
        // claim one more record than the body holds
        bytes[2] = 3;
        let decoder = FramedBlockDecoder::new(Seekable::new(Cursor::new(bytes)).unwrap());
        let mut source = BlockStreamSource::new(decoder);
        assert!(matches!(
            source.move_next(Filter::ACCEPT_ALL),
            Err(StreamError::Decode(DecodeError::Truncated { .. }))
        ));
    }

    #[test]
    fn finalize_with_nothing_pending_writes_nothing() {
        let (bytes, blocks) = write_blocks(&[], BlockWriterConfig::default());
        assert!(bytes.is_empty());
        assert_eq!(blocks, 0);
    }

    #[test]
    fn typed_adds_match_generic_add() {
        let geos = sorted();
        let config = BlockWriterConfig {
            max_records: 3,
            ..BlockWriterConfig::default()
        };
        let mut target = BlockStreamTarget::with_config(Vec::new(), config);
        for geo in &geos {
            match geo {
                OsmGeo::Node(node) => target.add_node(node).unwrap(),
                OsmGeo::Way(way) => target.add_way(way).unwrap(),
                OsmGeo::Relation(relation) => target.add_relation(relation).unwrap(),
            }
        }
        target.finalize().unwrap();
        // nodes 3+2, ways 3, relation 1
        assert_eq!(target.blocks_written(), 4);
        assert_eq!(target.records_written(), geos.len() as u64);

        let typed = target.into_inner();
        let (generic, _) = write_blocks(&geos, config);
        assert_eq!(typed, generic);
        assert_eq!(read_all(typed, Filter::ACCEPT_ALL), geos);
    }
}
