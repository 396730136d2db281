use std::io::{Read, Write};

use crate::error::WireError;
use crate::scalar::{read_u8, try_read_u8, write_u8};
use crate::varint::{read_varint, write_varint};

/// Per-frame flags bitfield.
///
/// Bit layout:
///   bit 0 = body contains at least one node
///   bit 1 = body contains at least one way
///   bit 2 = body contains at least one relation
///   bit 3 = body is zstd-compressed
///   bits 4-7 = reserved
///
/// The presence bits let a reader decide whether a block can hold anything
/// the current filter accepts without touching the body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameFlags(u8);

impl FrameFlags {
    pub const NONE: Self = Self(0);
    pub const HAS_NODES: Self = Self(0b0000_0001);
    pub const HAS_WAYS: Self = Self(0b0000_0010);
    pub const HAS_RELATIONS: Self = Self(0b0000_0100);
    pub const COMPRESSED: Self = Self(0b0000_1000);

    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    #[must_use]
    pub fn has_nodes(self) -> bool {
        self.0 & Self::HAS_NODES.0 != 0
    }

    #[must_use]
    pub fn has_ways(self) -> bool {
        self.0 & Self::HAS_WAYS.0 != 0
    }

    #[must_use]
    pub fn has_relations(self) -> bool {
        self.0 & Self::HAS_RELATIONS.0 != 0
    }

    #[must_use]
    pub fn is_compressed(self) -> bool {
        self.0 & Self::COMPRESSED.0 != 0
    }
}

/// Known frame kinds.
pub mod frame_kind {
    /// A group of flat records.
    pub const PRIMITIVES: u8 = 0x01;
}

/// Frame header of the block container format.
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ kind         (uint8)                             │
/// │ flags        (uint8)                             │
/// │ count        (varint)  records in the body       │
/// │ content_len  (varint)  body length in bytes      │
/// │ body         [content_len bytes]                 │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// The header is read and written separately from the body so that a
/// reader can skip a body it has no use for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    pub kind: u8,
    pub flags: FrameFlags,
    pub count: u64,
    pub content_len: u64,
}

impl FrameHeader {
    /// Write the header. Returns the number of bytes written.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, WireError> {
        let mut n = write_u8(w, self.kind)?;
        n += write_u8(w, self.flags.raw())?;
        n += write_varint(w, self.count)?;
        n += write_varint(w, self.content_len)?;
        Ok(n)
    }

    /// Read a header from the stream.
    ///
    /// Returns `Ok(None)` when the stream is cleanly exhausted before the
    /// first byte; a stream that ends anywhere inside the header is an
    /// [`WireError::UnexpectedEof`].
    pub fn read_from<R: Read + ?Sized>(r: &mut R) -> Result<Option<(Self, usize)>, WireError> {
        let Some(kind) = try_read_u8(r)? else {
            return Ok(None);
        };
        let flags = FrameFlags::from_raw(read_u8(r, "frame flags")?);
        let (count, a) = read_varint(r, "frame record count")?;
        let (content_len, b) = read_varint(r, "frame content length")?;

        Ok(Some((
            Self {
                kind,
                flags,
                count,
                content_len,
            },
            2 + a + b,
        )))
    }
}
