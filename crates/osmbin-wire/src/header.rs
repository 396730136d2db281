/// Record header byte.
///
/// The first byte of every flat record carries the entity type and one
/// absence bit per optional attribute. Absence bits have inverted sense:
/// a **set** bit means the field is **not** on the wire.
///
/// ```text
/// ┌───────┬──────────────────────────────────────────┐
/// │ Bits  │ Meaning                                  │
/// ├───────┼──────────────────────────────────────────┤
/// │ 0–1   │ type code: 1 node, 2 way, 3 relation     │
/// │ 2     │ id absent                                │
/// │ 3     │ changeset id absent                      │
/// │ 4     │ timestamp absent                         │
/// │ 5     │ user id absent                           │
/// │ 6     │ version absent                           │
/// │ 7     │ visible absent                           │
/// └───────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordHeader(u8);

impl RecordHeader {
    pub const TYPE_MASK: u8 = 0b0000_0011;

    pub const ID_ABSENT: Self = Self(0b0000_0100);
    pub const CHANGESET_ABSENT: Self = Self(0b0000_1000);
    pub const TIMESTAMP_ABSENT: Self = Self(0b0001_0000);
    pub const USER_ID_ABSENT: Self = Self(0b0010_0000);
    pub const VERSION_ABSENT: Self = Self(0b0100_0000);
    pub const VISIBLE_ABSENT: Self = Self(0b1000_0000);

    /// Start a header for the given type code with every field present.
    #[must_use]
    pub fn for_type_code(code: u8) -> Self {
        Self(code & Self::TYPE_MASK)
    }

    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u8 {
        self.0
    }

    /// The two low bits. `0` is never written and is rejected on read.
    #[must_use]
    pub fn type_code(self) -> u8 {
        self.0 & Self::TYPE_MASK
    }

    /// Set `flag` when `absent` is true; leave the header alone otherwise.
    #[must_use]
    pub fn absent_if(self, flag: Self, absent: bool) -> Self {
        if absent { Self(self.0 | flag.0) } else { self }
    }

    fn present(self, flag: Self) -> bool {
        self.0 & flag.0 == 0
    }

    #[must_use]
    pub fn has_id(self) -> bool {
        self.present(Self::ID_ABSENT)
    }

    #[must_use]
    pub fn has_changeset(self) -> bool {
        self.present(Self::CHANGESET_ABSENT)
    }

    #[must_use]
    pub fn has_timestamp(self) -> bool {
        self.present(Self::TIMESTAMP_ABSENT)
    }

    #[must_use]
    pub fn has_user_id(self) -> bool {
        self.present(Self::USER_ID_ABSENT)
    }

    #[must_use]
    pub fn has_version(self) -> bool {
        self.present(Self::VERSION_ABSENT)
    }

    #[must_use]
    pub fn has_visible(self) -> bool {
        self.present(Self::VISIBLE_ABSENT)
    }
}

/// Node coordinate flag byte, same inverted sense as [`RecordHeader`].
///
///   bit 0 = latitude absent
///   bit 1 = longitude absent
///   bits 2-7 = unused, written as zero
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoordFlags(u8);

impl CoordFlags {
    pub const NONE: Self = Self(0);
    pub const LATITUDE_ABSENT: Self = Self(0b0000_0001);
    pub const LONGITUDE_ABSENT: Self = Self(0b0000_0010);

    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn absent_if(self, flag: Self, absent: bool) -> Self {
        if absent { Self(self.0 | flag.0) } else { self }
    }

    #[must_use]
    pub fn has_latitude(self) -> bool {
        self.0 & Self::LATITUDE_ABSENT.0 == 0
    }

    #[must_use]
    pub fn has_longitude(self) -> bool {
        self.0 & Self::LONGITUDE_ABSENT.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_present_is_just_the_type_code() {
        let header = RecordHeader::for_type_code(2);
        assert_eq!(header.raw(), 0x02);
        assert!(header.has_id());
        assert!(header.has_changeset());
        assert!(header.has_timestamp());
        assert!(header.has_user_id());
        assert!(header.has_version());
        assert!(header.has_visible());
    }

    #[test]
    fn node_with_only_an_id() {
        let header = RecordHeader::for_type_code(1)
            .absent_if(RecordHeader::ID_ABSENT, false)
            .absent_if(RecordHeader::CHANGESET_ABSENT, true)
            .absent_if(RecordHeader::TIMESTAMP_ABSENT, true)
            .absent_if(RecordHeader::USER_ID_ABSENT, true)
            .absent_if(RecordHeader::VERSION_ABSENT, true)
            .absent_if(RecordHeader::VISIBLE_ABSENT, true);
        assert_eq!(header.raw(), 0xF9);
        assert_eq!(header.type_code(), 1);
        assert!(header.has_id());
        assert!(!header.has_visible());
    }

    #[test]
    fn everything_absent() {
        let header = RecordHeader::from_raw(0xFF);
        assert_eq!(header.type_code(), 3);
        assert!(!header.has_id());
        assert!(!header.has_changeset());
        assert!(!header.has_timestamp());
        assert!(!header.has_user_id());
        assert!(!header.has_version());
        assert!(!header.has_visible());
    }

    #[test]
    fn type_code_zero_is_representable() {
        // Readers reject it; the header type itself doesn't.
        assert_eq!(RecordHeader::from_raw(0b1111_1100).type_code(), 0);
    }

    #[test]
    fn coord_flags() {
        let flags = CoordFlags::NONE.absent_if(CoordFlags::LONGITUDE_ABSENT, true);
        assert_eq!(flags.raw(), 0x02);
        assert!(flags.has_latitude());
        assert!(!flags.has_longitude());
    }
}
