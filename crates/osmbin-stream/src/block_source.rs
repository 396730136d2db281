use std::rc::Rc;

use log::{debug, trace};
use osmbin_types::{OsmGeo, OsmGeoType};

use crate::block_cache::{BlockReport, PrimitiveConsumer, PrimitiveQueue};
use crate::error::StreamError;
use crate::filter::Filter;
use crate::skip::SkipOffsets;
use crate::source::{OsmStreamSource, SourceState};

/// A reader for some block-oriented encoding.
///
/// The decoder owns the underlying stream. Positions are whatever the
/// decoder uses to address block boundaries; the source only records them
/// and hands them back to `seek_to`.
pub trait BlockDecoder {
    /// Per-block context shared by every primitive decoded from the block.
    type Block;
    /// A decoded but not yet materialized entity.
    type Primitive;

    fn can_seek(&self) -> bool;

    /// Position of the next block boundary.
    fn position(&self) -> u64;

    fn seek_to(&mut self, position: u64) -> Result<(), StreamError>;

    /// Decode the next block, pushing its primitives into `consumer`.
    ///
    /// Returns `Ok(None)` at the end of input. The decoder may leave out
    /// primitive kinds `filter` rejects, but the report's presence flags
    /// must still describe the whole block.
    fn decode_next(
        &mut self,
        consumer: &mut dyn PrimitiveConsumer<Self::Block, Self::Primitive>,
        filter: Filter,
    ) -> Result<Option<BlockReport>, StreamError>;

    /// Turn a queued primitive into an entity.
    fn materialize(
        &self,
        block: &Self::Block,
        kind: OsmGeoType,
        primitive: Self::Primitive,
    ) -> Result<OsmGeo, StreamError>;
}

/// Entity source over a [`BlockDecoder`].
///
/// Advances drain the primitive queue first and only ask the decoder for
/// another block when the queue holds nothing the filter accepts. Block
/// start offsets of the first way-bearing and relation-bearing blocks are
/// remembered, so a later pass that ignores nodes (or nodes and ways)
/// jumps past everything before them.
pub struct BlockStreamSource<D: BlockDecoder> {
    decoder: D,
    queue: PrimitiveQueue<D::Block, D::Primitive>,
    initial_position: u64,
    offsets: SkipOffsets,
    current: Option<OsmGeo>,
    current_block: Option<Rc<D::Block>>,
    state: SourceState,
    blocks_decoded: u64,
}

impl<D: BlockDecoder> BlockStreamSource<D> {
    pub fn new(decoder: D) -> Self {
        let initial_position = decoder.position();
        Self {
            decoder,
            queue: PrimitiveQueue::new(),
            initial_position,
            offsets: SkipOffsets::default(),
            current: None,
            current_block: None,
            state: SourceState::Created,
            blocks_decoded: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> SourceState {
        self.state
    }

    #[must_use]
    pub fn first_way_offset(&self) -> Option<u64> {
        self.offsets.first_way()
    }

    #[must_use]
    pub fn first_relation_offset(&self) -> Option<u64> {
        self.offsets.first_relation()
    }

    /// The block the current entity came from.
    #[must_use]
    pub fn current_block(&self) -> Option<&D::Block> {
        self.current_block.as_deref()
    }

    /// Blocks handed to the decoder since construction, including reruns
    /// after a reset.
    #[must_use]
    pub fn blocks_decoded(&self) -> u64 {
        self.blocks_decoded
    }

    #[must_use]
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn into_inner(self) -> D {
        self.decoder
    }

    /// Decode blocks until one reports an accepted primitive.
    ///
    /// Returns `false` at the end of input.
    fn fill(&mut self, filter: Filter) -> Result<bool, StreamError> {
        let seekable = self.decoder.can_seek();
        if seekable {
            let position = self.decoder.position();
            if let Some(target) = self.offsets.seek_target(filter, position) {
                debug!(from = position, to = target; "skipping ahead to block");
                self.decoder.seek_to(target)?;
            }
        }

        loop {
            let before = self.decoder.position();
            let Some(report) = self.decoder.decode_next(&mut self.queue, filter)? else {
                return Ok(false);
            };
            self.blocks_decoded += 1;

            if seekable {
                for geo_type in [OsmGeoType::Way, OsmGeoType::Relation] {
                    if report.has(geo_type) && self.offsets.record(geo_type, before) {
                        debug!(geo_type = geo_type.as_str(), offset = before; "first block of kind");
                    }
                }
            }

            if report.accepted {
                return Ok(true);
            }
            trace!(offset = before; "block had nothing accepted");
        }
    }
}

impl<D: BlockDecoder> OsmStreamSource for BlockStreamSource<D> {
    fn move_next(&mut self, filter: Filter) -> Result<bool, StreamError> {
        if self.state == SourceState::Created {
            self.state = SourceState::Iterating;
        }

        loop {
            if let Some(entry) = self.queue.pop_accepted(filter) {
                let geo = self
                    .decoder
                    .materialize(&entry.block, entry.kind, entry.primitive)?;
                self.current = Some(geo);
                self.current_block = Some(entry.block);
                self.state = SourceState::Iterating;
                return Ok(true);
            }

            if !self.fill(filter)? {
                self.state = SourceState::Exhausted;
                return Ok(false);
            }
        }
    }

    fn current(&self) -> Option<&OsmGeo> {
        self.current.as_ref()
    }

    fn can_reset(&self) -> bool {
        self.decoder.can_seek()
    }

    fn reset(&mut self) -> Result<(), StreamError> {
        if !self.decoder.can_seek() {
            return Err(StreamError::ResetUnsupported);
        }
        self.decoder.seek_to(self.initial_position)?;
        self.queue.clear();
        self.current = None;
        self.current_block = None;
        self.state = SourceState::Created;
        debug!(position = self.initial_position; "block source reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osmbin_types::{Common, Node, Relation, Way};

    /// In-memory decoder: a block is a list of `(kind, id)`, positions are
    /// block indices.
    struct VecDecoder {
        blocks: Vec<Vec<(OsmGeoType, i64)>>,
        next: usize,
        seekable: bool,
        decoded: Vec<usize>,
    }

    impl VecDecoder {
        fn new(blocks: Vec<Vec<(OsmGeoType, i64)>>) -> Self {
            Self {
                blocks,
                next: 0,
                seekable: true,
                decoded: Vec::new(),
            }
        }
    }

    impl BlockDecoder for VecDecoder {
        type Block = usize;
        type Primitive = i64;

        fn can_seek(&self) -> bool {
            self.seekable
        }

        fn position(&self) -> u64 {
            self.next as u64
        }

        fn seek_to(&mut self, position: u64) -> Result<(), StreamError> {
            self.next = usize::try_from(position).unwrap();
            Ok(())
        }

        fn decode_next(
            &mut self,
            consumer: &mut dyn PrimitiveConsumer<usize, i64>,
            filter: Filter,
        ) -> Result<Option<BlockReport>, StreamError> {
            let Some(block) = self.blocks.get(self.next) else {
                return Ok(None);
            };
            let index = Rc::new(self.next);
            self.decoded.push(self.next);
            self.next += 1;

            let mut report = BlockReport::default();
            for &(kind, id) in block {
                match kind {
                    OsmGeoType::Node => {
                        report.has_nodes = true;
                        consumer.process_node(&index, id);
                    }
                    OsmGeoType::Way => {
                        report.has_ways = true;
                        consumer.process_way(&index, id);
                    }
                    OsmGeoType::Relation => {
                        report.has_relations = true;
                        consumer.process_relation(&index, id);
                    }
                }
                report.accepted |= filter.accepts(kind);
            }
            Ok(Some(report))
        }

        fn materialize(
            &self,
            _block: &usize,
            kind: OsmGeoType,
            id: i64,
        ) -> Result<OsmGeo, StreamError> {
            let common = Common {
                id: Some(id),
                ..Common::default()
            };
            Ok(match kind {
                OsmGeoType::Node => Node {
                    common,
                    ..Node::default()
                }
                .into(),
                OsmGeoType::Way => Way {
                    common,
                    ..Way::default()
                }
                .into(),
                OsmGeoType::Relation => Relation {
                    common,
                    ..Relation::default()
                }
                .into(),
            })
        }
    }

    fn sorted_blocks() -> Vec<Vec<(OsmGeoType, i64)>> {
        use OsmGeoType::{Node, Relation, Way};
        vec![
            vec![(Node, 1), (Node, 2)],
            vec![(Node, 3)],
            vec![(Way, 10), (Way, 11)],
            vec![(Relation, 20)],
        ]
    }

    fn ids<D: BlockDecoder>(source: &mut BlockStreamSource<D>, filter: Filter) -> Vec<i64> {
        source
            .records(filter)
            .map(|r| r.unwrap().id().unwrap())
            .collect()
    }

    #[test]
    fn drains_blocks_in_order() {
        let mut source = BlockStreamSource::new(VecDecoder::new(sorted_blocks()));
        assert_eq!(ids(&mut source, Filter::ACCEPT_ALL), [1, 2, 3, 10, 11, 20]);
        assert_eq!(source.state(), SourceState::Exhausted);
        assert_eq!(source.first_way_offset(), Some(2));
        assert_eq!(source.first_relation_offset(), Some(3));
    }

    #[test]
    fn current_block_follows_current_record() {
        let mut source = BlockStreamSource::new(VecDecoder::new(sorted_blocks()));
        let no_nodes = Filter::ACCEPT_ALL.ignoring(OsmGeoType::Node);
        assert!(source.move_next(no_nodes).unwrap());
        assert_eq!(source.current_block(), Some(&2));
        assert_eq!(source.current().and_then(OsmGeo::id), Some(10));
    }

    #[test]
    fn second_pass_skips_node_blocks() {
        let mut source = BlockStreamSource::new(VecDecoder::new(sorted_blocks()));
        let _ = ids(&mut source, Filter::ACCEPT_ALL);
        source.reset().unwrap();
        source.decoder.decoded.clear();

        let only_relations = Filter::ACCEPT_ALL
            .ignoring(OsmGeoType::Node)
            .ignoring(OsmGeoType::Way);
        assert_eq!(ids(&mut source, only_relations), [20]);
        assert_eq!(source.decoder().decoded, [3]);
    }

    #[test]
    fn reset_reproduces_output() {
        let mut source = BlockStreamSource::new(VecDecoder::new(sorted_blocks()));
        let no_ways = Filter::ACCEPT_ALL.ignoring(OsmGeoType::Way);
        let first = ids(&mut source, no_ways);
        source.reset().unwrap();
        assert!(source.current().is_none());
        assert!(source.current_block().is_none());
        assert_eq!(ids(&mut source, no_ways), first);
        assert_eq!(first, [1, 2, 3, 20]);
    }

    #[test]
    fn reset_mid_block_drops_queued_primitives() {
        let mut source = BlockStreamSource::new(VecDecoder::new(sorted_blocks()));
        assert!(source.move_next(Filter::ACCEPT_ALL).unwrap());
        source.reset().unwrap();
        assert_eq!(ids(&mut source, Filter::ACCEPT_ALL), [1, 2, 3, 10, 11, 20]);
    }

    #[test]
    fn non_seekable_decoder_cannot_reset() {
        let mut decoder = VecDecoder::new(sorted_blocks());
        decoder.seekable = false;
        let mut source = BlockStreamSource::new(decoder);
        assert!(!source.can_reset());
        assert_eq!(ids(&mut source, Filter::ACCEPT_ALL).len(), 6);
        assert_eq!(source.first_way_offset(), None);
        assert!(matches!(source.reset(), Err(StreamError::ResetUnsupported)));
    }

    #[test]
    fn mixed_block_is_filtered_at_dequeue() {
        use OsmGeoType::{Node, Way};
        let mut source =
            BlockStreamSource::new(VecDecoder::new(vec![vec![(Node, 1), (Way, 2), (Node, 3)]]));
        let no_nodes = Filter::ACCEPT_ALL.ignoring(Node);
        assert_eq!(ids(&mut source, no_nodes), [2]);
    }

    #[test]
    fn empty_input() {
        let mut source = BlockStreamSource::new(VecDecoder::new(vec![]));
        assert!(!source.move_next(Filter::ACCEPT_ALL).unwrap());
        assert_eq!(source.state(), SourceState::Exhausted);
    }
}
