//! JSON form of an entity, shared by `encode` manifests and `decode`
//! output.
//!
//! ```json
//! { "type": "node", "id": 1, "lat": 50.8, "lon": 4.35,
//!   "tags": [{ "k": "amenity", "v": "bench" }] }
//! { "type": "way", "id": 10, "version": 2, "nodes": [1, 2, 3] }
//! { "type": "relation", "id": 20,
//!   "members": [{ "type": "way", "ref": 10, "role": "outer" }] }
//! ```
//!
//! Every attribute except `type` is optional. Timestamps are whole Unix
//! seconds. Tags are a list so their order survives the round trip.

use anyhow::{Result, bail};
use osmbin_types::{
    Common, Node, OsmGeo, OsmGeoType, Relation, RelationMember, TagsCollection, Timestamp, Way,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct Manifest {
    pub entities: Vec<JsonEntity>,
}

#[derive(Serialize, Deserialize)]
pub struct JsonTag {
    pub k: String,
    pub v: String,
}

#[derive(Serialize, Deserialize)]
pub struct JsonMember {
    #[serde(rename = "type")]
    pub member_type: String,
    #[serde(rename = "ref")]
    pub id: i64,
    #[serde(default)]
    pub role: String,
}

#[derive(Serialize, Deserialize)]
pub struct JsonEntity {
    #[serde(rename = "type")]
    pub geo_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changeset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<JsonTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<JsonMember>,
}

fn parse_geo_type(name: &str) -> Result<OsmGeoType> {
    Ok(match name {
        "node" => OsmGeoType::Node,
        "way" => OsmGeoType::Way,
        "relation" => OsmGeoType::Relation,
        other => bail!("unknown entity type {other:?} (expected node, way, or relation)"),
    })
}

impl JsonEntity {
    pub fn into_osm_geo(self) -> Result<OsmGeo> {
        let geo_type = parse_geo_type(&self.geo_type)?;
        let common = Common {
            id: self.id,
            changeset_id: self.changeset,
            timestamp: self.timestamp.map(Timestamp::from_unix_seconds),
            user_id: self.uid,
            user_name: self.user,
            version: self.version,
            visible: self.visible,
            tags: self
                .tags
                .into_iter()
                .map(|t| (t.k, t.v))
                .collect::<TagsCollection>(),
        };

        Ok(match geo_type {
            OsmGeoType::Node => Node {
                common,
                latitude: self.lat,
                longitude: self.lon,
            }
            .into(),
            OsmGeoType::Way => Way {
                common,
                nodes: self.nodes,
            }
            .into(),
            OsmGeoType::Relation => Relation {
                common,
                members: self
                    .members
                    .into_iter()
                    .map(|m| {
                        Ok(RelationMember {
                            id: m.id,
                            member_type: parse_geo_type(&m.member_type)?,
                            role: m.role,
                        })
                    })
                    .collect::<Result<_>>()?,
            }
            .into(),
        })
    }
}

impl From<&OsmGeo> for JsonEntity {
    fn from(geo: &OsmGeo) -> Self {
        let common = geo.common();
        let mut entity = Self {
            geo_type: geo.geo_type().as_str().to_string(),
            id: common.id,
            changeset: common.changeset_id,
            timestamp: common.timestamp.map(Timestamp::to_unix_seconds),
            uid: common.user_id,
            user: common.user_name.clone(),
            version: common.version,
            visible: common.visible,
            tags: common
                .tags
                .iter()
                .map(|t| JsonTag {
                    k: t.key.clone(),
                    v: t.value.clone(),
                })
                .collect(),
            lat: None,
            lon: None,
            nodes: Vec::new(),
            members: Vec::new(),
        };

        match geo {
            OsmGeo::Node(node) => {
                entity.lat = node.latitude;
                entity.lon = node.longitude;
            }
            OsmGeo::Way(way) => entity.nodes.clone_from(&way.nodes),
            OsmGeo::Relation(relation) => {
                entity.members = relation
                    .members
                    .iter()
                    .map(|m| JsonMember {
                        member_type: m.member_type.as_str().to_string(),
                        id: m.id,
                        role: m.role.clone(),
                    })
                    .collect();
            }
        }
        entity
    }
}
