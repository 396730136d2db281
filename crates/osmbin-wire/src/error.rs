use std::io;

/// Errors raised while reading or writing the raw byte layer.
///
/// ```text
///   WireError
///   ├── VarintTooLong    ← block frame varint ran past 10 bytes
///   ├── UnexpectedEof    ← stream ended inside a fixed-size field
///   └── Io               ← any other failure of the underlying stream
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Varint encoding exceeded 10 bytes without terminating.
    #[error("varint too long: exceeded 10-byte limit")]
    VarintTooLong,

    /// The stream ended before a complete field could be read.
    ///
    /// `field` names what was being read when the bytes ran out, e.g.
    /// `"changeset id"` or `"string chunk"`.
    #[error("unexpected end of input while reading {field}")]
    UnexpectedEof { field: &'static str },

    /// I/O error during read or write.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl WireError {
    /// Classify an error coming back from an exact-length read.
    ///
    /// `read_exact` (and every `byteorder` reader built on it) reports a
    /// short read as `ErrorKind::UnexpectedEof`; that becomes
    /// [`WireError::UnexpectedEof`] tagged with the field name. Everything
    /// else passes through untouched.
    #[must_use]
    pub fn from_read(err: io::Error, field: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof { field }
        } else {
            Self::Io(err)
        }
    }
}
