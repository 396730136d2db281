#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use osmbin_encoder::append_osm_geo;
use osmbin_types::{
    Common, Node, OsmGeo, OsmGeoType, Relation, RelationMember, TagsCollection, Timestamp, Way,
};
use osmbin_wire::CodecConfig;

#[derive(Debug, Arbitrary)]
struct FuzzCommon {
    id: Option<i64>,
    changeset_id: Option<i64>,
    timestamp: Option<i64>,
    user_id: Option<i64>,
    user_name: String,
    version: Option<i32>,
    visible: Option<bool>,
    tags: Vec<(String, String)>,
}

#[derive(Debug, Arbitrary)]
enum FuzzEntity {
    Node {
        common: FuzzCommon,
        latitude: Option<f64>,
        longitude: Option<f64>,
    },
    Way {
        common: FuzzCommon,
        nodes: Vec<i64>,
    },
    Relation {
        common: FuzzCommon,
        members: Vec<(i64, String, u8)>,
    },
}

/// Blank strings are written as empty ones.
fn normalize(value: String) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        value
    }
}

/// NaN never compares equal, so it is replaced before the round trip.
fn coordinate(value: Option<f64>) -> Option<f64> {
    value.map(|v| if v.is_nan() { 0.0 } else { v })
}

fn build_common(c: FuzzCommon) -> Common {
    Common {
        id: c.id,
        changeset_id: c.changeset_id,
        timestamp: c.timestamp.map(Timestamp::from_ticks),
        user_id: c.user_id,
        user_name: normalize(c.user_name),
        version: c.version,
        visible: c.visible,
        tags: c
            .tags
            .into_iter()
            .map(|(k, v)| (normalize(k), normalize(v)))
            .collect::<TagsCollection>(),
    }
}

fn build(entity: FuzzEntity) -> OsmGeo {
    match entity {
        FuzzEntity::Node {
            common,
            latitude,
            longitude,
        } => Node {
            common: build_common(common),
            latitude: coordinate(latitude),
            longitude: coordinate(longitude),
        }
        .into(),
        FuzzEntity::Way { common, nodes } => Way {
            common: build_common(common),
            nodes,
        }
        .into(),
        FuzzEntity::Relation { common, members } => Relation {
            common: build_common(common),
            members: members
                .into_iter()
                .map(|(id, role, kind)| RelationMember {
                    id,
                    role: normalize(role),
                    member_type: OsmGeoType::ALL[usize::from(kind % 3)],
                })
                .collect(),
        }
        .into(),
    }
}

// Fuzz target: encode arbitrary entities with lossless chunking, decode
// them back, and require structural equality.
fuzz_target!(|entities: Vec<FuzzEntity>| {
    let config = CodecConfig::contiguous();
    let entities: Vec<OsmGeo> = entities.into_iter().map(build).collect();

    let mut bytes = Vec::new();
    for geo in &entities {
        append_osm_geo(&mut bytes, geo, &config).unwrap();
    }

    let mut cursor = bytes.as_slice();
    for expected in &entities {
        let decoded = osmbin_decoder::read_osm_geo(&mut cursor, &config)
            .unwrap()
            .unwrap();
        assert_eq!(&decoded, expected);
    }
    assert!(osmbin_decoder::read_osm_geo(&mut cursor, &config)
        .unwrap()
        .is_none());
});
