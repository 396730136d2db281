//! Flat record encoder.
//!
//! Each `append_*` function writes exactly one record at the writer's
//! current position and returns the number of bytes written. The writer is
//! never seeked and nothing is buffered beyond what the writer itself does.
//!
//! # Record layout
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────┐
//! │ header      u8       │ type code + absence bits (RecordHeader)      │
//! │ id          i64 LE   │ if present                                   │
//! │ changeset   i64 LE   │ if present                                   │
//! │ timestamp   i64 LE   │ ticks, if present                            │
//! │ user id     i64 LE   │ if present                                   │
//! │ user name   chunked  │ always, even when empty                      │
//! │ version     i32 LE   │ if present                                   │
//! │ visible     u8       │ 0/1, if present                              │
//! │ tag count   i32 LE   │ then key, value as chunked strings           │
//! ├──────────────────────┼──────────────────────────────────────────────┤
//! │ node        u8 flags │ then latitude, longitude f64 LE if present   │
//! │ way         i32 LE   │ node count, then node ids i64 LE             │
//! │ relation    i32 LE   │ member count, then id i64, role, type u8     │
//! └──────────────────────┴──────────────────────────────────────────────┘
//! ```

use std::io::Write;

use osmbin_types::{Common, Node, OsmGeo, OsmGeoType, Relation, Way};
use osmbin_wire::chunked::write_string;
use osmbin_wire::scalar::{write_bool, write_f64, write_i32, write_i64, write_u8};
use osmbin_wire::{CodecConfig, CoordFlags, RecordHeader};

use crate::error::EncodeError;

/// Append any entity.
pub fn append_osm_geo<W: Write + ?Sized>(
    w: &mut W,
    geo: &OsmGeo,
    config: &CodecConfig,
) -> Result<usize, EncodeError> {
    match geo {
        OsmGeo::Node(node) => append_node(w, node, config),
        OsmGeo::Way(way) => append_way(w, way, config),
        OsmGeo::Relation(relation) => append_relation(w, relation, config),
    }
}

/// Append an entity that may be missing.
///
/// # Errors
///
/// [`EncodeError::MissingEntity`] when `geo` is `None`; nothing is written.
pub fn try_append<W: Write + ?Sized>(
    w: &mut W,
    geo: Option<&OsmGeo>,
    config: &CodecConfig,
) -> Result<usize, EncodeError> {
    let geo = geo.ok_or(EncodeError::MissingEntity)?;
    append_osm_geo(w, geo, config)
}

pub fn append_node<W: Write + ?Sized>(
    w: &mut W,
    node: &Node,
    config: &CodecConfig,
) -> Result<usize, EncodeError> {
    check_count("tag", node.common.tags.len())?;

    let mut size = append_header(w, OsmGeoType::Node, &node.common)?;
    size += append_common(w, &node.common, config)?;

    let flags = CoordFlags::NONE
        .absent_if(CoordFlags::LATITUDE_ABSENT, node.latitude.is_none())
        .absent_if(CoordFlags::LONGITUDE_ABSENT, node.longitude.is_none());
    size += write_u8(w, flags.raw())?;
    if let Some(lat) = node.latitude {
        size += write_f64(w, lat)?;
    }
    if let Some(lon) = node.longitude {
        size += write_f64(w, lon)?;
    }

    Ok(size)
}

pub fn append_way<W: Write + ?Sized>(
    w: &mut W,
    way: &Way,
    config: &CodecConfig,
) -> Result<usize, EncodeError> {
    check_count("tag", way.common.tags.len())?;
    let node_count = check_count("way node", way.nodes.len())?;

    let mut size = append_header(w, OsmGeoType::Way, &way.common)?;
    size += append_common(w, &way.common, config)?;

    size += write_i32(w, node_count)?;
    for &node_id in &way.nodes {
        size += write_i64(w, node_id)?;
    }

    Ok(size)
}

pub fn append_relation<W: Write + ?Sized>(
    w: &mut W,
    relation: &Relation,
    config: &CodecConfig,
) -> Result<usize, EncodeError> {
    check_count("tag", relation.common.tags.len())?;
    let member_count = check_count("relation member", relation.members.len())?;

    let mut size = append_header(w, OsmGeoType::Relation, &relation.common)?;
    size += append_common(w, &relation.common, config)?;

    size += write_i32(w, member_count)?;
    for member in &relation.members {
        size += write_i64(w, member.id)?;
        size += write_string(w, &member.role, config.chunking)?;
        size += write_u8(w, member.member_type.wire_code())?;
    }

    Ok(size)
}

fn append_header<W: Write + ?Sized>(
    w: &mut W,
    geo_type: OsmGeoType,
    common: &Common,
) -> Result<usize, EncodeError> {
    let header = RecordHeader::for_type_code(geo_type.wire_code())
        .absent_if(RecordHeader::ID_ABSENT, common.id.is_none())
        .absent_if(RecordHeader::CHANGESET_ABSENT, common.changeset_id.is_none())
        .absent_if(RecordHeader::TIMESTAMP_ABSENT, common.timestamp.is_none())
        .absent_if(RecordHeader::USER_ID_ABSENT, common.user_id.is_none())
        .absent_if(RecordHeader::VERSION_ABSENT, common.version.is_none())
        .absent_if(RecordHeader::VISIBLE_ABSENT, common.visible.is_none());
    Ok(write_u8(w, header.raw())?)
}

fn append_common<W: Write + ?Sized>(
    w: &mut W,
    common: &Common,
    config: &CodecConfig,
) -> Result<usize, EncodeError> {
    let mut size = 0;

    if let Some(id) = common.id {
        size += write_i64(w, id)?;
    }
    if let Some(changeset_id) = common.changeset_id {
        size += write_i64(w, changeset_id)?;
    }
    if let Some(timestamp) = common.timestamp {
        size += write_i64(w, timestamp.ticks())?;
    }
    if let Some(user_id) = common.user_id {
        size += write_i64(w, user_id)?;
    }
    size += write_string(w, &common.user_name, config.chunking)?;
    if let Some(version) = common.version {
        size += write_i32(w, version)?;
    }
    if let Some(visible) = common.visible {
        size += write_bool(w, visible)?;
    }

    // Counts were checked by the caller before the header went out.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let tag_count = common.tags.len() as i32;
    size += write_i32(w, tag_count)?;
    for tag in &common.tags {
        size += write_string(w, &tag.key, config.chunking)?;
        size += write_string(w, &tag.value, config.chunking)?;
    }

    Ok(size)
}

fn check_count(what: &'static str, count: usize) -> Result<i32, EncodeError> {
    i32::try_from(count).map_err(|_| EncodeError::TooManyItems { what, count })
}
