use crate::geo_type::OsmGeoType;
use crate::tags::TagsCollection;
use crate::timestamp::Timestamp;

/// Attributes shared by every entity kind.
///
/// Every scalar is independently optional; `None` is carried on the wire
/// by a header bit, not a sentinel value. `user_name` is always present
/// and may be empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Common {
    pub id: Option<i64>,
    pub changeset_id: Option<i64>,
    pub timestamp: Option<Timestamp>,
    pub user_id: Option<i64>,
    pub user_name: String,
    pub version: Option<i32>,
    pub visible: Option<bool>,
    pub tags: TagsCollection,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    pub common: Common,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A way. An empty node list and "no node list" are the same thing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Way {
    pub common: Common,
    pub nodes: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationMember {
    pub id: i64,
    pub member_type: OsmGeoType,
    pub role: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Relation {
    pub common: Common,
    pub members: Vec<RelationMember>,
}

/// A decoded OSM entity.
///
/// The variant is the entity kind; the shared attributes are reachable
/// through [`common`](Self::common) regardless of kind.
#[derive(Clone, Debug, PartialEq)]
pub enum OsmGeo {
    Node(Node),
    Way(Way),
    Relation(Relation),
}

impl OsmGeo {
    #[must_use]
    pub fn geo_type(&self) -> OsmGeoType {
        match self {
            Self::Node(_) => OsmGeoType::Node,
            Self::Way(_) => OsmGeoType::Way,
            Self::Relation(_) => OsmGeoType::Relation,
        }
    }

    #[must_use]
    pub fn common(&self) -> &Common {
        match self {
            Self::Node(n) => &n.common,
            Self::Way(w) => &w.common,
            Self::Relation(r) => &r.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut Common {
        match self {
            Self::Node(n) => &mut n.common,
            Self::Way(w) => &mut w.common,
            Self::Relation(r) => &mut r.common,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.common().id
    }

    #[must_use]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_way(&self) -> Option<&Way> {
        match self {
            Self::Way(w) => Some(w),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Self::Relation(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Node> for OsmGeo {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Way> for OsmGeo {
    fn from(way: Way) -> Self {
        Self::Way(way)
    }
}

impl From<Relation> for OsmGeo {
    fn from(relation: Relation) -> Self {
        Self::Relation(relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_type_follows_variant() {
        assert_eq!(OsmGeo::from(Node::default()).geo_type(), OsmGeoType::Node);
        assert_eq!(OsmGeo::from(Way::default()).geo_type(), OsmGeoType::Way);
        assert_eq!(OsmGeo::from(Relation::default()).geo_type(), OsmGeoType::Relation);
    }

    #[test]
    fn common_is_shared_across_variants() {
        let mut geo = OsmGeo::from(Way {
            common: Common {
                id: Some(42),
                ..Common::default()
            },
            nodes: vec![1, 2, 3],
        });
        assert_eq!(geo.id(), Some(42));

        geo.common_mut().tags.add_or_replace("highway", "path");
        assert_eq!(geo.common().tags.get("highway"), Some("path"));
        assert_eq!(geo.as_way().map(|w| w.nodes.len()), Some(3));
        assert!(geo.as_node().is_none());
    }

    #[test]
    fn default_common_has_nothing_present() {
        let common = Common::default();
        assert!(common.id.is_none());
        assert!(common.changeset_id.is_none());
        assert!(common.timestamp.is_none());
        assert!(common.user_id.is_none());
        assert!(common.user_name.is_empty());
        assert!(common.version.is_none());
        assert!(common.visible.is_none());
        assert!(common.tags.is_empty());
    }
}
