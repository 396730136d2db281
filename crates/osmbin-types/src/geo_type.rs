use std::fmt;

use crate::error::TypeError;

/// The three OSM entity kinds.
///
/// ```text
/// ┌──────┬──────────┬───────────────────────────────────────┐
/// │ Wire │ Variant  │ Description                           │
/// ├──────┼──────────┼───────────────────────────────────────┤
/// │ 1    │ Node     │ A point with optional coordinates     │
/// │ 2    │ Way      │ An ordered list of node ids           │
/// │ 3    │ Relation │ An ordered list of typed members      │
/// └──────┴──────────┴───────────────────────────────────────┘
/// ```
///
/// The same codes are used for the record header's type bits and for the
/// member type byte inside relations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OsmGeoType {
    Node,
    Way,
    Relation,
}

impl OsmGeoType {
    pub const ALL: [Self; 3] = [Self::Node, Self::Way, Self::Relation];

    #[must_use]
    pub fn wire_code(self) -> u8 {
        match self {
            Self::Node => 1,
            Self::Way => 2,
            Self::Relation => 3,
        }
    }

    /// Parse a record header type code.
    ///
    /// # Errors
    ///
    /// [`TypeError::InvalidGeoType`] for anything but 1, 2 or 3.
    pub fn from_wire_code(code: u8) -> Result<Self, TypeError> {
        match code {
            1 => Ok(Self::Node),
            2 => Ok(Self::Way),
            3 => Ok(Self::Relation),
            other => Err(TypeError::InvalidGeoType { code: other }),
        }
    }

    /// Parse a relation member type byte. Unknown values read as `Node`.
    #[must_use]
    pub fn from_member_code(code: u8) -> Self {
        match code {
            2 => Self::Way,
            3 => Self::Relation,
            _ => Self::Node,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
        }
    }
}

impl fmt::Display for OsmGeoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_roundtrip() {
        for t in OsmGeoType::ALL {
            assert_eq!(OsmGeoType::from_wire_code(t.wire_code()).unwrap(), t);
            assert_eq!(OsmGeoType::from_member_code(t.wire_code()), t);
        }
    }

    #[test]
    fn header_code_zero_is_rejected() {
        assert!(matches!(
            OsmGeoType::from_wire_code(0),
            Err(TypeError::InvalidGeoType { code: 0 })
        ));
    }

    #[test]
    fn member_code_falls_back_to_node() {
        assert_eq!(OsmGeoType::from_member_code(0), OsmGeoType::Node);
        assert_eq!(OsmGeoType::from_member_code(9), OsmGeoType::Node);
        assert_eq!(OsmGeoType::from_member_code(0xFF), OsmGeoType::Node);
    }
}
