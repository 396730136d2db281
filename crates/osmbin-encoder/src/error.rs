use osmbin_wire::WireError;

/// Errors that can occur while appending a record.
///
/// ```text
///   EncodeError
///   ├── MissingEntity      ← nothing to encode; no bytes were written
///   ├── TooManyItems       ← a count does not fit the 32-bit wire field
///   ├── Wire(WireError)    ← from osmbin-wire field writers
///   └── Io(std::io::Error) ← from the underlying writer
/// ```
///
/// `MissingEntity` and `TooManyItems` are detected before the header byte
/// goes out, so the writer is left exactly where it was.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("no entity was given to encode")]
    MissingEntity,

    #[error("{what} count {count} exceeds the 32-bit wire limit")]
    TooManyItems { what: &'static str, count: usize },

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
