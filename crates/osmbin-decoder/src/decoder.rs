//! Flat record decoder, the inverse of `osmbin_encoder::append_osm_geo`.
//!
//! Fields come back in exactly the order they were written. The header
//! byte is the only place where running out of input is a normal outcome;
//! anywhere after it the record is truncated.

use std::io::Read;

use osmbin_types::{
    Common, Node, OsmGeo, OsmGeoType, Relation, RelationMember, TagsCollection, Timestamp, Way,
};
use osmbin_wire::chunked::read_string;
use osmbin_wire::scalar::{read_f64, read_i32, read_i64, read_u8, try_read_u8};
use osmbin_wire::{CodecConfig, CoordFlags, RecordHeader};

use crate::error::DecodeError;

/// Upper bound on speculative preallocation from an on-wire count.
///
/// Counts come from untrusted input; vectors still grow past this as real
/// entries are read.
const PREALLOC_LIMIT: usize = 1024;

/// Read the next record.
///
/// Returns `Ok(None)` when the stream is exhausted before the header byte.
///
/// # Errors
///
/// - [`DecodeError::InvalidGeoType`] when the header's type code is 0.
/// - [`DecodeError::InvalidBool`] when the visible byte is not 0 or 1.
/// - [`DecodeError::Truncated`] when the stream ends inside the record.
pub fn read_osm_geo<R: Read + ?Sized>(
    r: &mut R,
    config: &CodecConfig,
) -> Result<Option<OsmGeo>, DecodeError> {
    let Some(raw) = try_read_u8(r)? else {
        return Ok(None);
    };
    let header = RecordHeader::from_raw(raw);
    let geo_type = OsmGeoType::from_wire_code(header.type_code())
        .map_err(|_| DecodeError::InvalidGeoType {
            code: header.type_code(),
        })?;

    let common = read_common(r, header, config)?;
    let geo = match geo_type {
        OsmGeoType::Node => OsmGeo::Node(read_node(r, common)?),
        OsmGeoType::Way => OsmGeo::Way(read_way(r, common)?),
        OsmGeoType::Relation => OsmGeo::Relation(read_relation(r, common, config)?),
    };
    Ok(Some(geo))
}

fn read_common<R: Read + ?Sized>(
    r: &mut R,
    header: RecordHeader,
    config: &CodecConfig,
) -> Result<Common, DecodeError> {
    let id = header.has_id().then(|| read_i64(r, "id")).transpose()?;
    let changeset_id = header
        .has_changeset()
        .then(|| read_i64(r, "changeset id"))
        .transpose()?;
    let timestamp = header
        .has_timestamp()
        .then(|| read_i64(r, "timestamp"))
        .transpose()?
        .map(Timestamp::from_ticks);
    let user_id = header
        .has_user_id()
        .then(|| read_i64(r, "user id"))
        .transpose()?;
    let user_name = read_string(r, config.chunking)?;
    let version = header
        .has_version()
        .then(|| read_i32(r, "version"))
        .transpose()?;
    let visible = if header.has_visible() {
        Some(read_bool(r, "visible")?)
    } else {
        None
    };

    let tag_count = read_count(r, "tag count")?;
    let mut tags = TagsCollection::with_capacity(tag_count.min(PREALLOC_LIMIT));
    for _ in 0..tag_count {
        let key = read_string(r, config.chunking)?;
        let value = read_string(r, config.chunking)?;
        tags.add_or_replace(key, value);
    }

    Ok(Common {
        id,
        changeset_id,
        timestamp,
        user_id,
        user_name,
        version,
        visible,
        tags,
    })
}

fn read_node<R: Read + ?Sized>(r: &mut R, common: Common) -> Result<Node, DecodeError> {
    let flags = CoordFlags::from_raw(read_u8(r, "coordinate flags")?);
    let latitude = flags
        .has_latitude()
        .then(|| read_f64(r, "latitude"))
        .transpose()?;
    let longitude = flags
        .has_longitude()
        .then(|| read_f64(r, "longitude"))
        .transpose()?;
    Ok(Node {
        common,
        latitude,
        longitude,
    })
}

fn read_way<R: Read + ?Sized>(r: &mut R, common: Common) -> Result<Way, DecodeError> {
    let count = read_count(r, "way node count")?;
    let mut nodes = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        nodes.push(read_i64(r, "way node id")?);
    }
    Ok(Way { common, nodes })
}

fn read_relation<R: Read + ?Sized>(
    r: &mut R,
    common: Common,
    config: &CodecConfig,
) -> Result<Relation, DecodeError> {
    let count = read_count(r, "relation member count")?;
    let mut members = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        let id = read_i64(r, "member id")?;
        let role = read_string(r, config.chunking)?;
        let member_type = OsmGeoType::from_member_code(read_u8(r, "member type")?);
        members.push(RelationMember {
            id,
            member_type,
            role,
        });
    }
    Ok(Relation { common, members })
}

/// Counts are signed on the wire; a negative count means no entries.
fn read_count<R: Read + ?Sized>(r: &mut R, field: &'static str) -> Result<usize, DecodeError> {
    let raw = read_i32(r, field)?;
    Ok(usize::try_from(raw).unwrap_or(0))
}

fn read_bool<R: Read + ?Sized>(r: &mut R, field: &'static str) -> Result<bool, DecodeError> {
    match read_u8(r, field)? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(DecodeError::InvalidBool { field, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osmbin_encoder::append_osm_geo;
    use osmbin_wire::StringChunking;
    use std::io::Cursor;

    fn roundtrip(geo: &OsmGeo) -> OsmGeo {
        let config = CodecConfig::default();
        let mut buf = Vec::new();
        append_osm_geo(&mut buf, geo, &config).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded = read_osm_geo(&mut cursor, &config).unwrap().unwrap();
        assert!(read_osm_geo(&mut cursor, &config).unwrap().is_none());
        decoded
    }

    fn full_common() -> Common {
        Common {
            id: Some(-17),
            changeset_id: Some(123_456_789),
            timestamp: Some(Timestamp::from_unix_seconds(1_400_000_000)),
            user_id: Some(42),
            user_name: "mapper".to_string(),
            version: Some(3),
            visible: Some(false),
            tags: [("name", "Grand-Place"), ("tourism", "attraction")]
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn empty_input_is_end_of_sequence() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(read_osm_geo(&mut cursor, &CodecConfig::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn bench_node_roundtrip() {
        let node = OsmGeo::from(Node {
            common: Common {
                id: Some(1),
                tags: [("amenity", "bench")].into_iter().collect(),
                ..Common::default()
            },
            latitude: Some(50.8),
            longitude: Some(4.35),
        });
        assert_eq!(roundtrip(&node), node);
    }

    #[test]
    fn every_common_field_roundtrips() {
        let way = OsmGeo::from(Way {
            common: full_common(),
            nodes: vec![1, 2, 3, -4],
        });
        assert_eq!(roundtrip(&way), way);
    }

    #[test]
    fn partial_presence_roundtrips() {
        let node = OsmGeo::from(Node {
            common: Common {
                changeset_id: Some(9),
                visible: Some(true),
                ..Common::default()
            },
            latitude: None,
            longitude: Some(-0.5),
        });
        assert_eq!(roundtrip(&node), node);
    }

    #[test]
    fn empty_way_has_empty_node_list() {
        let way = OsmGeo::from(Way::default());
        let decoded = roundtrip(&way);
        assert_eq!(decoded.as_way().map(|w| w.nodes.len()), Some(0));
    }

    #[test]
    fn relation_members_roundtrip() {
        let relation = OsmGeo::from(Relation {
            common: full_common(),
            members: vec![
                RelationMember {
                    id: 1,
                    member_type: OsmGeoType::Node,
                    role: String::new(),
                },
                RelationMember {
                    id: 2,
                    member_type: OsmGeoType::Way,
                    role: "outer".to_string(),
                },
                RelationMember {
                    id: 3,
                    member_type: OsmGeoType::Relation,
                    role: "subarea".to_string(),
                },
            ],
        });
        assert_eq!(roundtrip(&relation), relation);
    }

    #[test]
    fn unknown_member_type_becomes_node() {
        // relation, all common attributes absent, no tags, one member
        let mut bytes = vec![0xFF, 0x00];
        bytes.extend_from_slice(&0i32.to_le_bytes());
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(&5i64.to_le_bytes());
        bytes.push(0); // empty role
        bytes.push(9);

        let geo = read_osm_geo(&mut Cursor::new(bytes), &CodecConfig::default())
            .unwrap()
            .unwrap();
        let member = &geo.as_relation().unwrap().members[0];
        assert_eq!(member.id, 5);
        assert_eq!(member.member_type, OsmGeoType::Node);
    }

    #[test]
    fn zero_type_code_is_rejected() {
        let err = read_osm_geo(&mut Cursor::new(vec![0xFC]), &CodecConfig::default())
            .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidGeoType { code: 0 }));
    }

    #[test]
    fn invalid_visible_byte_is_rejected() {
        // node, only visible present
        let bytes = vec![0x7D, 0x00, 0x02];
        let err = read_osm_geo(&mut Cursor::new(bytes), &CodecConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidBool {
                field: "visible",
                value: 2
            }
        ));
    }

    #[test]
    fn truncated_record_fails() {
        let mut buf = Vec::new();
        append_osm_geo(
            &mut buf,
            &Way {
                common: full_common(),
                nodes: vec![10, 20],
            }
            .into(),
            &CodecConfig::default(),
        )
        .unwrap();
        buf.truncate(buf.len() - 3);

        let err = read_osm_geo(&mut Cursor::new(buf), &CodecConfig::default()).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { field: "way node id" }));
    }

    #[test]
    fn negative_count_means_empty() {
        // way, nothing present, empty name, zero tags, node count -1
        let mut bytes = vec![0xFE, 0x00];
        bytes.extend_from_slice(&0i32.to_le_bytes());
        bytes.extend_from_slice(&(-1i32).to_le_bytes());
        let geo = read_osm_geo(&mut Cursor::new(bytes), &CodecConfig::default())
            .unwrap()
            .unwrap();
        assert!(geo.as_way().unwrap().nodes.is_empty());
    }

    #[test]
    fn records_decode_in_order() {
        let config = CodecConfig::default();
        let geos: Vec<OsmGeo> = vec![
            Node::default().into(),
            Way {
                common: full_common(),
                nodes: vec![1],
            }
            .into(),
            Relation::default().into(),
            Node {
                latitude: Some(1.0),
                ..Node::default()
            }
            .into(),
        ];
        let mut buf = Vec::new();
        for geo in &geos {
            append_osm_geo(&mut buf, geo, &config).unwrap();
        }

        let mut cursor = Cursor::new(buf);
        let mut decoded = Vec::new();
        while let Some(geo) = read_osm_geo(&mut cursor, &config).unwrap() {
            decoded.push(geo);
        }
        assert_eq!(decoded, geos);
    }

    #[test]
    fn contiguous_chunking_keeps_long_tags() {
        let config = CodecConfig {
            chunking: StringChunking::Contiguous,
        };
        let long = "x".repeat(700);
        let node = OsmGeo::from(Node {
            common: Common {
                tags: [("note", long.as_str())].into_iter().collect(),
                ..Common::default()
            },
            ..Node::default()
        });
        let mut buf = Vec::new();
        append_osm_geo(&mut buf, &node, &config).unwrap();
        let decoded = read_osm_geo(&mut Cursor::new(buf), &config).unwrap().unwrap();
        assert_eq!(decoded.common().tags.get("note"), Some(long.as_str()));
    }
}
