use std::io::{Read, Write};

use crate::error::WireError;
use crate::scalar::read_u8;

/// Maximum number of bytes a u64 varint can occupy.
/// ceil(64 / 7) = 10 bytes.
pub const MAX_VARINT_BYTES: usize = 10;

/// Encode a `u64` as an unsigned LEB128 varint into `buf`.
///
/// Returns the number of bytes used (1–10). A 10-byte buffer always fits.
///
/// | Value   | Encoded bytes        |
/// |---------|----------------------|
/// | 0       | `[0x00]`             |
/// | 127     | `[0x7F]`             |
/// | 128     | `[0x80, 0x01]`       |
/// | 300     | `[0xAC, 0x02]`       |
/// | 16384   | `[0x80, 0x80, 0x01]` |
pub fn encode_varint(mut value: u64, buf: &mut [u8; MAX_VARINT_BYTES]) -> usize {
    let mut i = 0;
    loop {
        #[allow(clippy::cast_possible_truncation)]
        let low = (value & 0x7F) as u8;
        value >>= 7;
        buf[i] = if value > 0 { low | 0x80 } else { low };
        i += 1;
        if value == 0 {
            return i;
        }
    }
}

/// Write `value` as a varint. Returns the number of bytes written.
pub fn write_varint<W: Write + ?Sized>(w: &mut W, value: u64) -> Result<usize, WireError> {
    let mut scratch = [0u8; MAX_VARINT_BYTES];
    let n = encode_varint(value, &mut scratch);
    w.write_all(&scratch[..n])?;
    Ok(n)
}

/// Read a varint from a stream, one byte at a time.
///
/// Returns `(value, bytes_consumed)`.
///
/// # Errors
///
/// - [`WireError::VarintTooLong`] after 10 continuation bytes.
/// - [`WireError::UnexpectedEof`] if the stream ends mid-varint.
pub fn read_varint<R: Read + ?Sized>(
    r: &mut R,
    field: &'static str,
) -> Result<(u64, usize), WireError> {
    let mut result: u64 = 0;
    let mut shift = 0u32;

    for consumed in 1..=MAX_VARINT_BYTES {
        let byte = read_u8(r, field)?;
        result |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok((result, consumed));
        }
        shift += 7;
    }

    Err(WireError::VarintTooLong)
}
