//! Positioned byte input.
//!
//! Sources need two things from their input beyond `Read`: the current
//! byte position (to record skip-ahead offsets) and, when available, the
//! ability to jump. [`Seekable`] wraps anything `Read + Seek`;
//! [`ForwardOnly`] wraps a plain `Read` such as stdin or a socket.
//!
//! Both adapters count bytes themselves rather than asking the OS, so
//! `position` is free to call once per record.

use std::io::{self, Read, Seek, SeekFrom};

pub trait ByteSource: Read {
    fn can_seek(&self) -> bool;

    /// Bytes consumed since the start of the underlying stream
    /// (`Seekable`) or since construction (`ForwardOnly`).
    fn position(&self) -> u64;

    /// Jump to an absolute position.
    ///
    /// # Errors
    ///
    /// `ErrorKind::Unsupported` on forward-only input.
    fn seek_to(&mut self, position: u64) -> io::Result<()>;

    /// Whether any bytes remain. Forward-only input cannot know ahead of
    /// time and always answers `true`.
    fn has_remaining(&self) -> bool;

    /// Move past `n` bytes without interpreting them.
    fn skip(&mut self, n: u64) -> io::Result<()>;
}

/// Random-access input.
pub struct Seekable<R> {
    inner: R,
    position: u64,
    len: u64,
}

impl<R: Read + Seek> Seekable<R> {
    /// Wrap `inner`, starting at its current position.
    ///
    /// The total length is taken once here; the stream must not grow or
    /// shrink while it is being read.
    pub fn new(mut inner: R) -> io::Result<Self> {
        let position = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(position))?;
        Ok(Self {
            inner,
            position,
            len,
        })
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Seekable<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}

impl<R: Read + Seek> ByteSource for Seekable<R> {
    fn can_seek(&self) -> bool {
        true
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn seek_to(&mut self, position: u64) -> io::Result<()> {
        self.position = self.inner.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    fn has_remaining(&self) -> bool {
        self.position < self.len
    }

    fn skip(&mut self, n: u64) -> io::Result<()> {
        self.seek_to(self.position.saturating_add(n))
    }
}

/// Sequential-only input.
pub struct ForwardOnly<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ForwardOnly<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for ForwardOnly<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}

impl<R: Read> ByteSource for ForwardOnly<R> {
    fn can_seek(&self) -> bool {
        false
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn seek_to(&mut self, _position: u64) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "forward-only input cannot seek",
        ))
    }

    fn has_remaining(&self) -> bool {
        true
    }

    fn skip(&mut self, n: u64) -> io::Result<()> {
        let copied = io::copy(&mut self.by_ref().take(n), &mut io::sink())?;
        if copied < n {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended inside a skipped region",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn seekable_tracks_position_and_remaining() {
        let mut src = Seekable::new(Cursor::new(vec![1u8, 2, 3, 4])).unwrap();
        assert_eq!(src.len(), 4);
        let mut buf = [0u8; 3];
        src.read_exact(&mut buf).unwrap();
        assert_eq!(src.position(), 3);
        assert!(src.has_remaining());
        src.skip(1).unwrap();
        assert!(!src.has_remaining());
        src.seek_to(1).unwrap();
        assert_eq!(src.position(), 1);
    }

    #[test]
    fn seekable_starts_where_the_inner_stream_is() {
        let mut cursor = Cursor::new(vec![0u8; 10]);
        cursor.set_position(4);
        let src = Seekable::new(cursor).unwrap();
        assert_eq!(src.position(), 4);
        assert_eq!(src.len(), 10);
    }

    #[test]
    fn forward_only_counts_and_skips() {
        let mut src = ForwardOnly::new(&[9u8, 8, 7, 6, 5][..]);
        src.skip(2).unwrap();
        assert_eq!(src.position(), 2);
        let mut byte = [0u8; 1];
        src.read_exact(&mut byte).unwrap();
        assert_eq!(byte, [7]);
        assert!(!src.can_seek());
        assert_eq!(
            src.seek_to(0).unwrap_err().kind(),
            io::ErrorKind::Unsupported
        );
    }

    #[test]
    fn forward_only_skip_past_end_fails() {
        let mut src = ForwardOnly::new(&[1u8, 2][..]);
        assert_eq!(
            src.skip(5).unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );
    }
}
