use crate::chunked::StringChunking;

/// Codec settings shared by the record encoder and decoder.
///
/// ```text
/// ┌──────────┬────────────────────────────────────────────────────────┐
/// │ Field    │ Purpose                                                │
/// ├──────────┼────────────────────────────────────────────────────────┤
/// │ chunking │ Legacy (file compatible) or Contiguous (lossless) long │
/// │          │ string layout. See [`StringChunking`].                 │
/// └──────────┴────────────────────────────────────────────────────────┘
/// ```
///
/// A reader must use the same chunking as the writer that produced the
/// stream. Nothing on the wire records which one was used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CodecConfig {
    pub chunking: StringChunking,
}

impl CodecConfig {
    /// Lossless long strings. Not readable by legacy readers once a string
    /// reaches 255 UTF-16 bytes.
    #[must_use]
    pub fn contiguous() -> Self {
        Self {
            chunking: StringChunking::Contiguous,
        }
    }
}
