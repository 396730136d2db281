#![warn(clippy::pedantic)]

pub mod compression;
pub mod encoder;
pub mod error;

pub use encoder::{append_node, append_osm_geo, append_relation, append_way, try_append};
pub use error::EncodeError;
