#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod geo_type;
pub mod tags;
pub mod timestamp;

pub use entity::{Common, Node, OsmGeo, Relation, RelationMember, Way};
pub use error::TypeError;
pub use geo_type::OsmGeoType;
pub use tags::{Tag, TagsCollection};
pub use timestamp::Timestamp;
