//! Length-chunked strings.
//!
//! Strings are UTF-16LE encoded and then written as a run of chunks, each
//! introduced by a one-byte length:
//!
//! ```text
//!   [255][255 bytes] [255][255 bytes] ... [n][n bytes]     n in 0..=254
//! ```
//!
//! A length byte of 255 means "a full chunk follows, and there is more".
//! The terminal chunk is always present, even when it is empty.
//!
//! Existing files were written with a writer that advances its source
//! cursor by 256 after each full chunk, one more than it copies, so every
//! full chunk silently drops the byte that follows it. Readers of those
//! files copy each chunk to offset `256 * k` of a scratch buffer and then
//! return the first `n` bytes of that buffer, where `n` is the terminal
//! length. Once a full chunk has been read, the result is therefore the
//! first `n` bytes of the *first* chunk, not the terminal chunk.
//! [`StringChunking::Legacy`] reproduces both halves of that behaviour;
//! [`StringChunking::Contiguous`] advances by 255 and concatenates every
//! chunk. The two modes produce identical bytes for anything shorter than
//! 255 raw bytes (127 UTF-16 code units).
//!
//! One divergence from the legacy writer: when the byte length is
//! `255 (mod 256)` its 256-byte stride overshoots the end by one and it
//! emits the negative remainder as a terminal length of 255, which its own
//! reader then takes for another full chunk. The writer here clamps the
//! remainder and writes an empty terminal chunk (`0`) instead, so the
//! terminal length is always in `0..=254`.

use std::io::{Read, Write};

use crate::error::WireError;
use crate::scalar::{read_u8, write_u8};

/// Length byte marking a full chunk.
pub const FULL_CHUNK: usize = 255;

/// How strings longer than one chunk are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StringChunking {
    /// Compatible with existing files. Multi-chunk strings lose data.
    #[default]
    Legacy,
    /// Lossless. Multi-chunk strings are not readable by legacy readers.
    Contiguous,
}

impl StringChunking {
    /// Distance the writer's source cursor moves after a full chunk.
    fn stride(self) -> usize {
        match self {
            Self::Legacy => FULL_CHUNK + 1,
            Self::Contiguous => FULL_CHUNK,
        }
    }
}

/// Write `bytes` as a chunk run. Returns the number of bytes written.
pub fn write_chunked_bytes<W: Write + ?Sized>(
    w: &mut W,
    bytes: &[u8],
    chunking: StringChunking,
) -> Result<usize, WireError> {
    let stride = chunking.stride();
    let mut cursor = 0;
    let mut written = 0;

    while bytes.len().saturating_sub(cursor) >= FULL_CHUNK {
        written += write_u8(w, FULL_CHUNK as u8)?;
        w.write_all(&bytes[cursor..cursor + FULL_CHUNK])?;
        written += FULL_CHUNK;
        cursor += stride;
    }

    // Legacy stepping can overshoot the end by one. The tail is then empty
    // and written as 0, where legacy writers wrapped the negative remainder to 255.
    let tail = bytes.len().saturating_sub(cursor);
    #[allow(clippy::cast_possible_truncation)]
    let tail_len = tail as u8;
    written += write_u8(w, tail_len)?;
    if tail > 0 {
        w.write_all(&bytes[cursor..])?;
        written += tail;
    }

    Ok(written)
}

/// Read a chunk run written by [`write_chunked_bytes`].
///
/// With [`StringChunking::Legacy`] the result is what legacy readers
/// produce for the same bytes: the terminal chunk when it is the only one,
/// otherwise the first terminal-length bytes of the first full chunk.
pub fn read_chunked_bytes<R: Read + ?Sized>(
    r: &mut R,
    chunking: StringChunking,
) -> Result<Vec<u8>, WireError> {
    let mut out = Vec::new();
    let mut first_chunk: Option<[u8; FULL_CHUNK]> = None;
    let mut len = usize::from(read_u8(r, "string length")?);

    while len == FULL_CHUNK {
        let mut chunk = [0u8; FULL_CHUNK];
        r.read_exact(&mut chunk)
            .map_err(|e| WireError::from_read(e, "string chunk"))?;
        match chunking {
            StringChunking::Legacy => {
                first_chunk.get_or_insert(chunk);
            }
            StringChunking::Contiguous => out.extend_from_slice(&chunk),
        }
        len = usize::from(read_u8(r, "string length")?);
    }

    let mut tail = vec![0u8; len];
    r.read_exact(&mut tail)
        .map_err(|e| WireError::from_read(e, "string chunk"))?;

    match chunking {
        StringChunking::Legacy => Ok(match first_chunk {
            Some(first) => first[..len].to_vec(),
            None => tail,
        }),
        StringChunking::Contiguous => {
            out.extend_from_slice(&tail);
            Ok(out)
        }
    }
}

/// Write a string as UTF-16LE chunks.
///
/// Empty and all-whitespace strings are written as a single zero byte.
pub fn write_string<W: Write + ?Sized>(
    w: &mut W,
    value: &str,
    chunking: StringChunking,
) -> Result<usize, WireError> {
    if value.trim().is_empty() {
        return write_u8(w, 0);
    }
    let bytes: Vec<u8> = value.encode_utf16().flat_map(u16::to_le_bytes).collect();
    write_chunked_bytes(w, &bytes, chunking)
}

/// Read a string written by [`write_string`].
///
/// Decoding is lossy: unpaired surrogates become U+FFFD and a trailing odd
/// byte is dropped. Legacy chunking can cut a string in the middle of a
/// surrogate pair, and that must not abort the whole stream.
pub fn read_string<R: Read + ?Sized>(
    r: &mut R,
    chunking: StringChunking,
) -> Result<String, WireError> {
    let bytes = read_chunked_bytes(r, chunking)?;
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    Ok(char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect())
}
