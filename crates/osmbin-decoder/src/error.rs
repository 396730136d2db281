use osmbin_wire::WireError;

/// Errors that can occur while decoding a record or a block body.
///
/// ```text
///   DecodeError
///   ├── InvalidGeoType     ← header type code outside 1..=3
///   ├── InvalidBool        ← visible byte other than 0 or 1
///   ├── Truncated          ← stream ended inside a record
///   ├── DecompressFailed   ← zstd could not parse a block body
///   ├── DecompressionBomb  ← decompressed body exceeds the size limit
///   ├── Wire(WireError)    ← other osmbin-wire failures
///   └── Io(std::io::Error) ← from the underlying reader
/// ```
///
/// A clean end of input before a record's header byte is not an error;
/// the decoder reports it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid entity type code {code}")]
    InvalidGeoType { code: u8 },

    #[error("invalid boolean byte {value:#04x} in {field}")]
    InvalidBool { field: &'static str, value: u8 },

    /// The record started but the stream ran out before it was complete.
    #[error("record truncated while reading {field}")]
    Truncated { field: &'static str },

    #[error("zstd decompression failed: {0}")]
    DecompressFailed(String),

    #[error("decompressed size {actual} exceeds limit {limit}")]
    DecompressionBomb { actual: usize, limit: usize },

    #[error(transparent)]
    Wire(WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<WireError> for DecodeError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::UnexpectedEof { field } => Self::Truncated { field },
            WireError::Io(e) => Self::Io(e),
            other => Self::Wire(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_read_becomes_truncated() {
        let err = DecodeError::from(WireError::UnexpectedEof { field: "user id" });
        assert!(matches!(err, DecodeError::Truncated { field: "user id" }));
        assert_eq!(err.to_string(), "record truncated while reading user id");
    }

    #[test]
    fn io_passes_through() {
        let err = DecodeError::from(WireError::Io(std::io::Error::other("boom")));
        assert!(matches!(err, DecodeError::Io(_)));
    }

    #[test]
    fn varint_stays_wire() {
        let err = DecodeError::from(WireError::VarintTooLong);
        assert!(matches!(err, DecodeError::Wire(WireError::VarintTooLong)));
    }
}
