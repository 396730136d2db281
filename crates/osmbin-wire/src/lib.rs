#![warn(clippy::pedantic)]

pub mod block_frame;
pub mod chunked;
pub mod config;
pub mod error;
pub mod header;
pub mod scalar;
pub mod varint;

pub use chunked::StringChunking;
pub use config::CodecConfig;
pub use error::WireError;
pub use header::{CoordFlags, RecordHeader};
