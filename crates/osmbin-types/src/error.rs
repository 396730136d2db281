/// Errors raised when interpreting raw values as entity model types.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// A record header carried a type code outside 1..=3.
    ///
    /// Only the record header is strict about this; relation member type
    /// bytes fall back to [`OsmGeoType::Node`](crate::OsmGeoType::Node).
    #[error("invalid entity type code: {code}")]
    InvalidGeoType { code: u8 },
}
