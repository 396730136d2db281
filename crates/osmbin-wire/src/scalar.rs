//! Fixed-width little-endian fields.
//!
//! Every numeric field of a flat record is a little-endian scalar. Reads
//! are exact-length: a stream that runs dry halfway through a field is a
//! [`WireError::UnexpectedEof`], never a silently zero-padded value.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::WireError;

pub fn write_i64<W: Write + ?Sized>(w: &mut W, value: i64) -> Result<usize, WireError> {
    w.write_i64::<LittleEndian>(value)?;
    Ok(8)
}

pub fn write_i32<W: Write + ?Sized>(w: &mut W, value: i32) -> Result<usize, WireError> {
    w.write_i32::<LittleEndian>(value)?;
    Ok(4)
}

pub fn write_f64<W: Write + ?Sized>(w: &mut W, value: f64) -> Result<usize, WireError> {
    w.write_f64::<LittleEndian>(value)?;
    Ok(8)
}

pub fn write_u8<W: Write + ?Sized>(w: &mut W, value: u8) -> Result<usize, WireError> {
    w.write_u8(value)?;
    Ok(1)
}

/// Booleans are a single byte, `0` or `1`.
pub fn write_bool<W: Write + ?Sized>(w: &mut W, value: bool) -> Result<usize, WireError> {
    write_u8(w, u8::from(value))
}

pub fn read_i64<R: Read + ?Sized>(r: &mut R, field: &'static str) -> Result<i64, WireError> {
    r.read_i64::<LittleEndian>()
        .map_err(|e| WireError::from_read(e, field))
}

pub fn read_i32<R: Read + ?Sized>(r: &mut R, field: &'static str) -> Result<i32, WireError> {
    r.read_i32::<LittleEndian>()
        .map_err(|e| WireError::from_read(e, field))
}

pub fn read_f64<R: Read + ?Sized>(r: &mut R, field: &'static str) -> Result<f64, WireError> {
    r.read_f64::<LittleEndian>()
        .map_err(|e| WireError::from_read(e, field))
}

pub fn read_u8<R: Read + ?Sized>(r: &mut R, field: &'static str) -> Result<u8, WireError> {
    r.read_u8().map_err(|e| WireError::from_read(e, field))
}

/// Read a single byte, returning `None` on a clean end of stream.
///
/// This is the only read that treats exhaustion as a normal outcome: it
/// is used for the first byte of a record or frame, where running out of
/// input simply means there is nothing left.
pub fn try_read_u8<R: Read + ?Sized>(r: &mut R) -> Result<Option<u8>, WireError> {
    let mut byte = [0u8; 1];
    loop {
        match r.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(WireError::Io(e)),
        }
    }
}
