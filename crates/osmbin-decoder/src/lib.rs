#![warn(clippy::pedantic)]

pub mod decoder;
pub mod decompression;
pub mod error;

pub use decoder::read_osm_geo;
pub use decompression::decompress;
pub use error::DecodeError;
