use osmbin_decoder::decompression::MAX_BLOCK_DECOMPRESSED_SIZE;
use osmbin_wire::CodecConfig;

/// Configuration for [`BlockStreamTarget`](crate::BlockStreamTarget).
///
/// ```text
/// ┌──────────────────────┬───────────────────────────────────────────────┐
/// │ Field                │ Purpose                                       │
/// ├──────────────────────┼───────────────────────────────────────────────┤
/// │ max_records          │ Records per block before the block is closed  │
/// │ split_on_type_change │ Close the block when the entity kind changes  │
/// │ compress             │ zstd-compress block bodies when it helps      │
/// │ codec                │ Record encoding options                       │
/// └──────────────────────┴───────────────────────────────────────────────┘
/// ```
///
/// Splitting on type change keeps every block homogeneous, which is what
/// lets a filtered reader skip whole blocks without decoding them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockWriterConfig {
    pub max_records: usize,
    pub split_on_type_change: bool,
    pub compress: bool,
    pub codec: CodecConfig,
}

impl Default for BlockWriterConfig {
    fn default() -> Self {
        Self {
            max_records: 8000,
            split_on_type_change: true,
            compress: false,
            codec: CodecConfig::default(),
        }
    }
}

/// Configuration for [`FramedBlockDecoder`](crate::FramedBlockDecoder).
///
/// `max_block_size` bounds both the on-wire body and its decompressed
/// size. Anything larger is rejected before it is buffered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockReaderConfig {
    pub max_block_size: usize,
    pub codec: CodecConfig,
}

impl Default for BlockReaderConfig {
    fn default() -> Self {
        Self {
            max_block_size: MAX_BLOCK_DECOMPRESSED_SIZE,
            codec: CodecConfig::default(),
        }
    }
}
