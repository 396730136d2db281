use log::debug;
use osmbin_types::OsmGeoType;

use crate::binary_target::OsmStreamTarget;
use crate::error::StreamError;
use crate::filter::Filter;
use crate::source::OsmStreamSource;

/// Per-kind record counts from a [`pump`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub nodes: u64,
    pub ways: u64,
    pub relations: u64,
}

impl PumpStats {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.nodes + self.ways + self.relations
    }

    pub fn count(&mut self, geo_type: OsmGeoType) {
        match geo_type {
            OsmGeoType::Node => self.nodes += 1,
            OsmGeoType::Way => self.ways += 1,
            OsmGeoType::Relation => self.relations += 1,
        }
    }
}

/// Copy every entity `filter` accepts from `source` into `target`.
///
/// The target is initialized before the first entity and finalized after
/// the last. On error the target is left unfinalized.
pub fn pump<S, T>(source: &mut S, target: &mut T, filter: Filter) -> Result<PumpStats, StreamError>
where
    S: OsmStreamSource + ?Sized,
    T: OsmStreamTarget + ?Sized,
{
    let mut stats = PumpStats::default();
    target.initialize()?;
    while source.move_next(filter)? {
        if let Some(geo) = source.current() {
            target.add(geo)?;
            stats.count(geo.geo_type());
        }
    }
    target.finalize()?;
    debug!(
        nodes = stats.nodes,
        ways = stats.ways,
        relations = stats.relations;
        "pump finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_source::BinaryStreamSource;
    use crate::binary_target::BinaryStreamTarget;
    use crate::byte_source::Seekable;
    use osmbin_types::{Node, OsmGeo, Relation, Way};
    use std::io::Cursor;

    #[test]
    fn copies_accepted_records() {
        let mut input = BinaryStreamTarget::new(Vec::new());
        for geo in [
            OsmGeo::from(Node::default()),
            Node::default().into(),
            Way::default().into(),
            Relation::default().into(),
        ] {
            input.add(&geo).unwrap();
        }
        let bytes = input.into_inner();

        let mut source = BinaryStreamSource::new(Seekable::new(Cursor::new(bytes)).unwrap());
        let mut output = BinaryStreamTarget::new(Vec::new());
        let stats = pump(
            &mut source,
            &mut output,
            Filter::ACCEPT_ALL.ignoring(OsmGeoType::Way),
        )
        .unwrap();

        assert_eq!(
            stats,
            PumpStats {
                nodes: 2,
                ways: 0,
                relations: 1
            }
        );
        assert_eq!(stats.total(), 3);
        assert_eq!(output.records_written(), 3);
    }
}
