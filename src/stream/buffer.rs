//! Seekable in-memory byte buffer with cursor tracking.
//!
//! This module provides [`crate::stream::Buffer`], the sole owner of storage and cursor state
//! for every stream in this crate. The fixed-width and variable-length codecs are stateless and
//! only ever consume or produce bytes through the primitives defined here.
//!
//! # Short-read semantics
//!
//! The raw byte primitives mirror a standard in-memory stream:
//!
//! - [`crate::stream::Buffer::read`] returns *up to* `n` bytes and never fails on short input
//! - [`crate::stream::Buffer::seek`] may move the cursor past the end; a following read is empty
//! - [`crate::stream::Buffer::search`] reports absence through `None`, never through an error
//!
//! Only [`crate::stream::Buffer::read_exact`] (used by the typed decoders) treats a short read
//! as [`crate::Error::Underflow`], and it does so without moving the cursor.
//!
//! # Attachment
//!
//! A buffer can be created without storage through [`crate::stream::Buffer::detached`]. Every
//! operation on such a buffer fails with [`crate::Error::Uninitialized`] until
//! [`crate::stream::Buffer::attach`] provides the bytes.
//!
//! # Examples
//!
//! ```rust
//! use datastream::Buffer;
//! use std::io::SeekFrom;
//!
//! let mut buffer = Buffer::from(vec![0xDE, 0xAD, 0xBE, 0xEF, 0x00]);
//! assert_eq!(buffer.search(&[0xBE, 0xEF])?, Some(2));
//! assert_eq!(buffer.tell()?, 0);
//!
//! buffer.seek(SeekFrom::End(-1))?;
//! assert_eq!(buffer.read(8)?, &[0x00]);
//! assert_eq!(buffer.read(8)?, &[] as &[u8]);
//! # Ok::<(), datastream::Error>(())
//! ```

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::{Error, Result};

/// A resizable byte sequence plus a cursor.
///
/// Cloning a [`Buffer`] is a snapshot: storage is deep-copied and the clone starts at the
/// same cursor position as the source. The two instances share nothing afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    storage: Option<Vec<u8>>,
    cursor: usize,
}

impl Buffer {
    /// Create an attached, empty buffer with the cursor at 0.
    #[must_use]
    pub fn new() -> Self {
        Buffer {
            storage: Some(Vec::new()),
            cursor: 0,
        }
    }

    /// Create a buffer without backing storage.
    ///
    /// Every operation returns [`crate::Error::Uninitialized`] until [`Buffer::attach`] is called.
    #[must_use]
    pub fn detached() -> Self {
        Buffer {
            storage: None,
            cursor: 0,
        }
    }

    /// Snapshot the full contents of a seekable container into a new buffer.
    ///
    /// The container is read from its start regardless of its current position, and its
    /// position is restored afterwards. Later changes to the container are not observed.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if reading or seeking the container fails.
    pub fn from_reader<R: Read + Seek>(container: &mut R) -> Result<Self> {
        let position = container.stream_position()?;
        container.seek(SeekFrom::Start(0))?;

        let mut data = Vec::new();
        container.read_to_end(&mut data)?;
        container.seek(SeekFrom::Start(position))?;

        Ok(Buffer::from(data))
    }

    /// Attach `data` as the backing storage, replacing anything previously held.
    ///
    /// The cursor is reset to 0.
    pub fn attach(&mut self, data: Vec<u8>) {
        tracing::trace!(len = data.len(), "attached buffer storage");
        self.storage = Some(data);
        self.cursor = 0;
    }

    /// Returns `true` if backing storage is present.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.storage.is_some()
    }

    /// Full contents of the buffer, independent of the cursor position.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn as_slice(&self) -> Result<&[u8]> {
        self.storage.as_deref().ok_or(Error::Uninitialized)
    }

    /// Consume the buffer and return its storage.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn into_inner(self) -> Result<Vec<u8>> {
        self.storage.ok_or(Error::Uninitialized)
    }

    /// Current cursor position.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn tell(&self) -> Result<usize> {
        self.as_slice().map(|_| self.cursor)
    }

    /// Total number of stored bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn size(&self) -> Result<usize> {
        self.as_slice().map(<[u8]>::len)
    }

    /// Bytes between the cursor and the end of storage, 0 if the cursor sits past the end.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn remaining(&self) -> Result<usize> {
        Ok(self.size()?.saturating_sub(self.cursor))
    }

    /// Reposition the cursor and return the new absolute position.
    ///
    /// Positions past the end are accepted without validation. A following read returns no
    /// bytes, a following write zero-fills the gap.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidOffset`] if the target lies before offset 0, or
    /// [`crate::Error::Uninitialized`] on a detached buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datastream::Buffer;
    /// use std::io::SeekFrom;
    ///
    /// let mut buffer = Buffer::from(vec![1, 2, 3, 4]);
    /// assert_eq!(buffer.seek(SeekFrom::Start(1))?, 1);
    /// assert_eq!(buffer.seek(SeekFrom::Current(2))?, 3);
    /// assert_eq!(buffer.seek(SeekFrom::End(4))?, 8);
    /// assert!(buffer.seek(SeekFrom::Current(-9)).is_err());
    /// # Ok::<(), datastream::Error>(())
    /// ```
    pub fn seek(&mut self, pos: SeekFrom) -> Result<usize> {
        let size = self.size()?;

        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(delta) => self.cursor as i128 + i128::from(delta),
            SeekFrom::End(delta) => size as i128 + i128::from(delta),
        };

        self.cursor = usize::try_from(target).map_err(|_| Error::InvalidOffset)?;
        Ok(self.cursor)
    }

    /// Move the cursor back to offset 0. Works on detached buffers as well.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Read up to `n` bytes from the cursor and advance past the bytes actually returned.
    ///
    /// Never fails because of short input: fewer than `n` bytes (possibly none) are returned
    /// when fewer remain.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn read(&mut self, n: usize) -> Result<&[u8]> {
        let Some(data) = self.storage.as_deref() else {
            return Err(Error::Uninitialized);
        };

        let start = self.cursor.min(data.len());
        let end = start.saturating_add(n).min(data.len());
        self.cursor = self.cursor.max(end);
        Ok(&data[start..end])
    }

    /// Read exactly `n` bytes from the cursor.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if fewer than `n` bytes remain; the cursor is not
    /// moved in that case. Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn read_exact(&mut self, n: usize) -> Result<&[u8]> {
        let available = self.remaining()?;
        if available < n {
            return Err(underflow_error!(n, available));
        }

        self.read(n)
    }

    /// Read a single byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] at the end of the buffer.
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_exact(1)?[0])
    }

    /// Write `bytes` at the cursor, overwriting and growing storage as needed.
    ///
    /// The cursor advances by `bytes.len()`. If the cursor was past the end, the gap is
    /// filled with zeroes first.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer, or
    /// [`crate::Error::InvalidOffset`] if the cursor sits so far past the end that the grown
    /// storage can not be addressed or allocated. Storage is left untouched in that case.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let Some(data) = self.storage.as_mut() else {
            return Err(Error::Uninitialized);
        };

        let end = self
            .cursor
            .checked_add(bytes.len())
            .ok_or(Error::InvalidOffset)?;
        if data.len() < end {
            data.try_reserve(end - data.len())
                .map_err(|_| Error::InvalidOffset)?;
            data.resize(end, 0);
        }

        data[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
        Ok(())
    }

    /// Return the next `n` bytes without advancing the cursor.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn peek(&self, n: usize) -> Result<&[u8]> {
        self.window(self.cursor, n)
    }

    /// Read `n` bytes at absolute `offset`, leaving the cursor where it was.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datastream::Buffer;
    ///
    /// let mut buffer = Buffer::from(vec![1, 2, 3, 4]);
    /// buffer.read(1)?;
    /// assert_eq!(buffer.seekpeek(2, 4)?, &[3, 4]);
    /// assert_eq!(buffer.tell()?, 1);
    /// # Ok::<(), datastream::Error>(())
    /// ```
    pub fn seekpeek(&self, offset: usize, n: usize) -> Result<&[u8]> {
        self.window(offset, n)
    }

    /// Find the first occurrence of `pattern` at or after the cursor.
    ///
    /// The scan advances one byte at a time and the cursor is left untouched. An empty pattern
    /// never matches.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn search(&self, pattern: &[u8]) -> Result<Option<usize>> {
        let data = self.as_slice()?;
        if pattern.is_empty() || self.cursor >= data.len() {
            return Ok(None);
        }

        Ok(data[self.cursor..]
            .windows(pattern.len())
            .position(|window| window == pattern)
            .map(|index| self.cursor + index))
    }

    /// Search backwards from the end of the buffer towards the cursor.
    ///
    /// Candidates are checked in strides of `pattern.len()` starting at `size - pattern.len()`,
    /// so only occurrences aligned on that grid (measured from the end) are found. The cursor
    /// is left untouched and an empty pattern never matches.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datastream::Buffer;
    ///
    /// let buffer = Buffer::from(b"abcdefcd".to_vec());
    /// assert_eq!(buffer.rsearch(b"cd")?, Some(6));
    /// assert_eq!(buffer.rsearch(b"zz")?, None);
    /// # Ok::<(), datastream::Error>(())
    /// ```
    pub fn rsearch(&self, pattern: &[u8]) -> Result<Option<usize>> {
        let data = self.as_slice()?;
        if pattern.is_empty() {
            return Ok(None);
        }

        let mut candidate = data.len().checked_sub(pattern.len());
        while let Some(offset) = candidate {
            if offset < self.cursor {
                break;
            }
            if &data[offset..offset + pattern.len()] == pattern {
                return Ok(Some(offset));
            }
            candidate = offset.checked_sub(pattern.len());
        }

        Ok(None)
    }

    /// Copy `storage[start..end]` into a new, independent buffer with its cursor at 0.
    ///
    /// Bounds are clamped to the stored length; `start > end` yields an empty buffer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn substream(&self, start: usize, end: usize) -> Result<Buffer> {
        let data = self.as_slice()?;
        let end = end.min(data.len());
        let start = start.min(end);

        tracing::trace!(start, end, "created substream");
        Ok(Buffer::from(&data[start..end]))
    }

    /// Truncate storage to zero length and reset the cursor to 0.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn clear(&mut self) -> Result<()> {
        let Some(data) = self.storage.as_mut() else {
            return Err(Error::Uninitialized);
        };

        tracing::trace!(len = data.len(), "cleared buffer");
        data.clear();
        self.cursor = 0;
        Ok(())
    }

    /// Execute a closure transactionally, restoring the cursor if it fails.
    ///
    /// # Errors
    /// Returns any error produced by `f`, after rolling back the cursor.
    pub fn transactional<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved = self.cursor;
        let result = f(self);
        if result.is_err() {
            self.cursor = saved;
        }
        result
    }

    fn window(&self, offset: usize, n: usize) -> Result<&[u8]> {
        let data = self.as_slice()?;
        let start = offset.min(data.len());
        let end = start.saturating_add(n).min(data.len());
        Ok(&data[start..end])
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Buffer {
            storage: Some(data),
            cursor: 0,
        }
    }
}

impl From<&[u8]> for Buffer {
    fn from(data: &[u8]) -> Self {
        Buffer::from(data.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Buffer {
    fn from(data: [u8; N]) -> Self {
        Buffer::from(data.to_vec())
    }
}

fn io_error(error: Error) -> io::Error {
    match error {
        Error::Io(inner) => inner,
        Error::InvalidOffset => io::Error::new(io::ErrorKind::InvalidInput, error),
        other => io::Error::other(other),
    }
}

impl Read for Buffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = Buffer::read(self, buf.len()).map_err(io_error)?;
        let len = chunk.len();
        buf[..len].copy_from_slice(chunk);
        Ok(len)
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Buffer::write(self, buf).map_err(io_error)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for Buffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Buffer::seek(self, pos)
            .map(|position| position as u64)
            .map_err(io_error)
    }
}
