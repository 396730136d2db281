#![warn(clippy::pedantic)]

pub mod binary_source;
pub mod binary_target;
pub mod block_cache;
pub mod block_source;
pub mod byte_source;
pub mod config;
pub mod error;
pub mod filter;
pub mod framed;
pub mod pump;
pub mod skip;
pub mod source;

pub use binary_source::BinaryStreamSource;
pub use binary_target::{BinaryStreamTarget, OsmStreamTarget};
pub use block_cache::{BlockReport, PrimitiveConsumer, PrimitiveQueue, QueuedPrimitive};
pub use block_source::{BlockDecoder, BlockStreamSource};
pub use byte_source::{ByteSource, ForwardOnly, Seekable};
pub use config::{BlockReaderConfig, BlockWriterConfig};
pub use error::StreamError;
pub use filter::Filter;
pub use framed::{BlockStreamTarget, FramedBlock, FramedBlockDecoder, FramedStreamSource};
pub use pump::{PumpStats, pump};
pub use skip::SkipOffsets;
pub use source::{OsmStreamSource, Records, SourceState};
