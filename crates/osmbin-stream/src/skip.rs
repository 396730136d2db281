//! Skip-ahead offsets.
//!
//! Files are conventionally ordered nodes, then ways, then relations. A
//! source that has once seen where the first way (or relation) starts can
//! jump straight there on a later pass that ignores what comes before.
//!
//! ```text
//!   ┌─────────────────┬──────────────┬───────────────────┐
//!   │ nodes ...       │ ways ...     │ relations ...     │
//!   └─────────────────┴──────────────┴───────────────────┘
//!                     ▲              ▲
//!                 first_way     first_relation
//! ```
//!
//! Offsets are recorded once and never overwritten, so a file that is not
//! sorted still gets the position of the *first* occurrence.

use osmbin_types::OsmGeoType;

use crate::filter::Filter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkipOffsets {
    first_way: Option<u64>,
    first_relation: Option<u64>,
}

impl SkipOffsets {
    #[must_use]
    pub fn first_way(&self) -> Option<u64> {
        self.first_way
    }

    #[must_use]
    pub fn first_relation(&self) -> Option<u64> {
        self.first_relation
    }

    /// Note that a record of `geo_type` starts at `offset`.
    ///
    /// Returns `true` if this filled a previously unknown offset. Nodes
    /// have no offset and always return `false`.
    pub fn record(&mut self, geo_type: OsmGeoType, offset: u64) -> bool {
        let slot = match geo_type {
            OsmGeoType::Node => return false,
            OsmGeoType::Way => &mut self.first_way,
            OsmGeoType::Relation => &mut self.first_relation,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(offset);
        true
    }

    /// Where a reader at `position` may jump to under `filter`, if anywhere.
    ///
    /// Ignoring nodes but not ways allows a jump to the first way; ignoring
    /// both allows a jump to the first relation. The jump only ever goes
    /// forward.
    #[must_use]
    pub fn seek_target(&self, filter: Filter, position: u64) -> Option<u64> {
        let target = if filter.ignore_nodes && !filter.ignore_ways {
            self.first_way
        } else if filter.ignore_nodes && filter.ignore_ways && !filter.ignore_relations {
            self.first_relation
        } else {
            None
        }?;
        (position < target).then_some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_write_once() {
        let mut offsets = SkipOffsets::default();
        assert!(offsets.record(OsmGeoType::Way, 100));
        assert!(!offsets.record(OsmGeoType::Way, 200));
        assert!(!offsets.record(OsmGeoType::Node, 5));
        assert_eq!(offsets.first_way(), Some(100));
        assert_eq!(offsets.first_relation(), None);
    }

    #[test]
    fn seek_target_follows_filter() {
        let mut offsets = SkipOffsets::default();
        offsets.record(OsmGeoType::Way, 100);
        offsets.record(OsmGeoType::Relation, 300);

        let no_nodes = Filter::ACCEPT_ALL.ignoring(OsmGeoType::Node);
        let only_relations = no_nodes.ignoring(OsmGeoType::Way);

        assert_eq!(offsets.seek_target(Filter::ACCEPT_ALL, 0), None);
        assert_eq!(offsets.seek_target(no_nodes, 0), Some(100));
        assert_eq!(offsets.seek_target(only_relations, 0), Some(300));
        assert_eq!(offsets.seek_target(only_relations.ignoring(OsmGeoType::Relation), 0), None);
    }

    #[test]
    fn never_seeks_backwards() {
        let mut offsets = SkipOffsets::default();
        offsets.record(OsmGeoType::Way, 100);
        let no_nodes = Filter::ACCEPT_ALL.ignoring(OsmGeoType::Node);
        assert_eq!(offsets.seek_target(no_nodes, 100), None);
        assert_eq!(offsets.seek_target(no_nodes, 150), None);
    }

    #[test]
    fn ignoring_only_ways_has_no_target() {
        let mut offsets = SkipOffsets::default();
        offsets.record(OsmGeoType::Relation, 300);
        let no_ways = Filter::ACCEPT_ALL.ignoring(OsmGeoType::Way);
        assert_eq!(offsets.seek_target(no_ways, 0), None);
    }
}
