use osmbin_types::OsmGeoType;

/// Which entity kinds a read should suppress.
///
/// The filter is passed on every advance rather than fixed at
/// construction, so one source can be read with different filters over
/// its lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Filter {
    pub ignore_nodes: bool,
    pub ignore_ways: bool,
    pub ignore_relations: bool,
}

impl Filter {
    pub const ACCEPT_ALL: Self = Self {
        ignore_nodes: false,
        ignore_ways: false,
        ignore_relations: false,
    };

    /// A copy of this filter that also suppresses `geo_type`.
    #[must_use]
    pub fn ignoring(self, geo_type: OsmGeoType) -> Self {
        match geo_type {
            OsmGeoType::Node => Self {
                ignore_nodes: true,
                ..self
            },
            OsmGeoType::Way => Self {
                ignore_ways: true,
                ..self
            },
            OsmGeoType::Relation => Self {
                ignore_relations: true,
                ..self
            },
        }
    }

    #[must_use]
    pub fn accepts(self, geo_type: OsmGeoType) -> bool {
        match geo_type {
            OsmGeoType::Node => !self.ignore_nodes,
            OsmGeoType::Way => !self.ignore_ways,
            OsmGeoType::Relation => !self.ignore_relations,
        }
    }

    /// True when at least one kind gets through.
    #[must_use]
    pub fn accepts_any(self) -> bool {
        OsmGeoType::ALL.into_iter().any(|t| self.accepts(t))
    }
}
