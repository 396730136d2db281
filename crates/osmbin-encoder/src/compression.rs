use std::io::Cursor;

/// Minimum block body size (in bytes) before compression is attempted.
///
/// Below this, zstd framing overhead outweighs any savings.
pub const COMPRESSION_THRESHOLD: usize = 256;

/// zstd level used for block bodies.
const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Compress a block body with zstd.
///
/// Returns `Some(compressed)` only if the body is at least
/// [`COMPRESSION_THRESHOLD`] bytes and compression actually made it
/// smaller. On `None` the caller stores the body as-is.
#[must_use]
pub fn compress(data: &[u8]) -> Option<Vec<u8>> {
    if data.len() < COMPRESSION_THRESHOLD {
        return None;
    }
    let compressed = zstd::encode_all(Cursor::new(data), DEFAULT_COMPRESSION_LEVEL).ok()?;
    (compressed.len() < data.len()).then_some(compressed)
}
