//! Shared entity fixtures for the integration tests, benches, and the
//! golden file generator.
//!
//! [`sorted_extract`] is the entity list behind `tests/golden/sorted_extract/`;
//! changing it means regenerating those files.

use osmbin_types::{
    Common, Node, OsmGeo, OsmGeoType, Relation, RelationMember, TagsCollection, Timestamp, Way,
};

fn tags(pairs: &[(&str, &str)]) -> TagsCollection {
    pairs.iter().map(|&(k, v)| (k, v)).collect()
}

fn with_id(id: i64) -> Common {
    Common {
        id: Some(id),
        ..Common::default()
    }
}

/// Node 1: id, one tag, both coordinates, every other attribute absent.
#[must_use]
pub fn bench_node() -> OsmGeo {
    Node {
        common: Common {
            tags: tags(&[("amenity", "bench")]),
            ..with_id(1)
        },
        latitude: Some(50.8),
        longitude: Some(4.35),
    }
    .into()
}

/// Three nodes, two ways, one relation, in canonical order.
#[must_use]
pub fn sorted_extract() -> Vec<OsmGeo> {
    vec![
        bench_node(),
        Node {
            common: Common {
                changeset_id: Some(100),
                timestamp: Some(Timestamp::from_unix_seconds(1_500_000_000)),
                user_id: Some(7),
                user_name: "alice".into(),
                version: Some(3),
                visible: Some(true),
                ..with_id(2)
            },
            latitude: Some(50.85),
            longitude: Some(4.36),
        }
        .into(),
        Node {
            common: Common {
                tags: tags(&[("name", "Zoë")]),
                ..with_id(3)
            },
            latitude: Some(-33.9),
            longitude: Some(151.2),
        }
        .into(),
        Way {
            common: Common {
                version: Some(1),
                tags: tags(&[("highway", "footway")]),
                ..with_id(10)
            },
            nodes: vec![1, 2, 3],
        }
        .into(),
        Way {
            common: with_id(11),
            nodes: Vec::new(),
        }
        .into(),
        Relation {
            common: Common {
                tags: tags(&[("type", "multipolygon")]),
                ..with_id(20)
            },
            members: vec![
                RelationMember {
                    id: 10,
                    role: "outer".into(),
                    member_type: OsmGeoType::Way,
                },
                RelationMember {
                    id: 1,
                    role: String::new(),
                    member_type: OsmGeoType::Node,
                },
                RelationMember {
                    id: 21,
                    role: "subarea".into(),
                    member_type: OsmGeoType::Relation,
                },
            ],
        }
        .into(),
    ]
}

/// A larger canonical-order extract for benchmarks.
///
/// Every way references four consecutive nodes and every relation has
/// two way members, so the shape resembles a small city extract.
#[must_use]
pub fn synthetic_extract(nodes: usize, ways: usize, relations: usize) -> Vec<OsmGeo> {
    let mut out = Vec::with_capacity(nodes + ways + relations);
    for i in 0..nodes {
        let id = i as i64 + 1;
        out.push(
            Node {
                common: Common {
                    version: Some(1),
                    timestamp: Some(Timestamp::from_unix_seconds(1_600_000_000 + id)),
                    tags: if i % 10 == 0 {
                        tags(&[("amenity", "bench"), ("backrest", "yes")])
                    } else {
                        TagsCollection::new()
                    },
                    ..with_id(id)
                },
                latitude: Some(50.0 + i as f64 * 1e-5),
                longitude: Some(4.0 + i as f64 * 1e-5),
            }
            .into(),
        );
    }
    for i in 0..ways {
        let first = (i * 4 % nodes.max(1)) as i64 + 1;
        out.push(
            Way {
                common: Common {
                    version: Some(2),
                    user_name: "mapper".into(),
                    tags: tags(&[("highway", "residential"), ("name", "Rue de la Loi")]),
                    ..with_id(1_000_000 + i as i64)
                },
                nodes: (first..first + 4).collect(),
            }
            .into(),
        );
    }
    for i in 0..relations {
        out.push(
            Relation {
                common: Common {
                    tags: tags(&[("type", "route"), ("route", "bus")]),
                    ..with_id(2_000_000 + i as i64)
                },
                members: vec![
                    RelationMember {
                        id: 1_000_000 + i as i64,
                        role: "forward".into(),
                        member_type: OsmGeoType::Way,
                    },
                    RelationMember {
                        id: 1_000_001 + i as i64,
                        role: "backward".into(),
                        member_type: OsmGeoType::Way,
                    },
                ],
            }
            .into(),
        );
    }
    out
}
