use osmbin_decoder::DecodeError;
use osmbin_encoder::EncodeError;
use osmbin_wire::WireError;

/// Errors raised by stream sources and targets.
///
/// ```text
///   StreamError
///   ├── ResetUnsupported     ← reset() on a forward-only input
///   ├── BlockTooLarge        ← frame body exceeds the reader's size limit
///   ├── Decode(DecodeError)  ← record decoding or block decompression
///   ├── Encode(EncodeError)  ← record encoding
///   ├── Wire(WireError)      ← frame header parsing
///   └── Io(std::io::Error)   ← positioning, skipping, flushing
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("stream cannot be reset: the underlying input is not seekable")]
    ResetUnsupported,

    #[error("block body of {size} bytes at offset {offset} exceeds limit {limit}")]
    BlockTooLarge { size: u64, offset: u64, limit: usize },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
