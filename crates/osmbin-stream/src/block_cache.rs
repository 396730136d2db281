//! Primitive queue between a block decoder and a block source.
//!
//! A block decoder unpacks a whole block at once but a source hands out
//! one entity per advance. The decoder pushes every primitive it decodes
//! into a [`PrimitiveQueue`] through the [`PrimitiveConsumer`] callbacks;
//! the source drains the queue, applying its filter as it goes.
//!
//! ```text
//!   BlockDecoder::decode_next ──process_*──▶ PrimitiveQueue ──pop_accepted──▶ source
//!                                           (block, kind, primitive)
//! ```
//!
//! Each queued entry keeps an `Rc` to its originating block, so per-block
//! context (string tables, offsets, ...) stays alive exactly as long as
//! some primitive from it is still queued or current.

use std::collections::VecDeque;
use std::rc::Rc;

use osmbin_types::OsmGeoType;

use crate::filter::Filter;

/// Sink for decoded primitives.
pub trait PrimitiveConsumer<B, P> {
    fn process_node(&mut self, block: &Rc<B>, primitive: P);
    fn process_way(&mut self, block: &Rc<B>, primitive: P);
    fn process_relation(&mut self, block: &Rc<B>, primitive: P);
}

/// What a block decoder learned about one block.
///
/// The presence flags describe the block's contents whether or not the
/// decoder actually decoded it. `accepted` is true when at least one
/// primitive the filter lets through was pushed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockReport {
    pub has_nodes: bool,
    pub has_ways: bool,
    pub has_relations: bool,
    pub accepted: bool,
}

impl BlockReport {
    #[must_use]
    pub fn has(&self, geo_type: OsmGeoType) -> bool {
        match geo_type {
            OsmGeoType::Node => self.has_nodes,
            OsmGeoType::Way => self.has_ways,
            OsmGeoType::Relation => self.has_relations,
        }
    }
}

pub struct QueuedPrimitive<B, P> {
    pub block: Rc<B>,
    pub kind: OsmGeoType,
    pub primitive: P,
}

/// FIFO of decoded primitives.
///
/// Everything pushed is kept; filtering happens on the way out.
pub struct PrimitiveQueue<B, P> {
    entries: VecDeque<QueuedPrimitive<B, P>>,
}

impl<B, P> PrimitiveQueue<B, P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, block: &Rc<B>, kind: OsmGeoType, primitive: P) {
        self.entries.push_back(QueuedPrimitive {
            block: Rc::clone(block),
            kind,
            primitive,
        });
    }

    pub fn pop(&mut self) -> Option<QueuedPrimitive<B, P>> {
        self.entries.pop_front()
    }

    /// Pop entries until one passes `filter`. Rejected entries are dropped.
    pub fn pop_accepted(&mut self, filter: Filter) -> Option<QueuedPrimitive<B, P>> {
        while let Some(entry) = self.entries.pop_front() {
            if filter.accepts(entry.kind) {
                return Some(entry);
            }
        }
        None
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<B, P> Default for PrimitiveQueue<B, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, P> PrimitiveConsumer<B, P> for PrimitiveQueue<B, P> {
    fn process_node(&mut self, block: &Rc<B>, primitive: P) {
        self.push(block, OsmGeoType::Node, primitive);
    }

    fn process_way(&mut self, block: &Rc<B>, primitive: P) {
        self.push(block, OsmGeoType::Way, primitive);
    }

    fn process_relation(&mut self, block: &Rc<B>, primitive: P) {
        self.push(block, OsmGeoType::Relation, primitive);
    }
}
