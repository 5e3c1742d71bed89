//! Provided-method views shared by every stream facade.
//!
//! The facades ([`crate::StreamReader`], [`crate::StreamWriter`], [`crate::DuplexStream`]) only
//! own a [`crate::Buffer`] and a [`crate::stream::StreamConfig`]. All behavior lives in three
//! traits with provided methods:
//!
//! - [`Stream`] - cursor navigation, search, sub-ranging and clearing
//! - [`ReadData`] - fixed-width and LEB128 decoding
//! - [`WriteData`] - fixed-width and LEB128 encoding
//!
//! A type implementing both [`ReadData`] and [`WriteData`] over one buffer interleaves reads and
//! writes against a single moving cursor.

use std::io::SeekFrom;

use crate::{
    stream::{
        field::parse_format,
        io::{read_value, write_value, FixedWidth},
        leb128, FieldKind, StreamConfig, Value, VarintLimits,
    },
    Buffer, ByteOrder, Error, Result,
};

/// Cursor navigation and buffer management common to every facade.
pub trait Stream: Sized {
    /// Shared access to the backing buffer.
    fn buffer(&self) -> &Buffer;

    /// Exclusive access to the backing buffer.
    fn buffer_mut(&mut self) -> &mut Buffer;

    /// Current configuration.
    fn config(&self) -> &StreamConfig;

    /// Exclusive access to the configuration.
    fn config_mut(&mut self) -> &mut StreamConfig;

    /// Build a facade of the same kind around `buffer`.
    fn from_parts(buffer: Buffer, config: StreamConfig) -> Self;

    /// Byte order used by fixed-width operations.
    fn byte_order(&self) -> ByteOrder {
        self.config().byte_order
    }

    /// Change the byte order. Only operations issued afterwards are affected.
    fn set_byte_order(&mut self, order: ByteOrder) {
        self.config_mut().byte_order = order;
    }

    /// Caps used by the `*_safe` varint operations.
    fn limits(&self) -> VarintLimits {
        self.config().limits
    }

    /// Change the varint caps. Only operations issued afterwards are affected.
    fn set_limits(&mut self, limits: VarintLimits) {
        self.config_mut().limits = limits;
    }

    /// Attach backing storage, resetting the cursor to 0.
    fn attach(&mut self, data: Vec<u8>) {
        self.buffer_mut().attach(data);
    }

    /// Returns `true` if backing storage is present.
    fn is_attached(&self) -> bool {
        self.buffer().is_attached()
    }

    /// See [`Buffer::seek`].
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidOffset`] for targets before offset 0.
    fn seek(&mut self, pos: SeekFrom) -> Result<usize> {
        self.buffer_mut().seek(pos)
    }

    /// Move the cursor to the absolute `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn seek_to(&mut self, offset: usize) -> Result<usize> {
        self.seek(SeekFrom::Start(offset as u64))
    }

    /// See [`Buffer::tell`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn tell(&self) -> Result<usize> {
        self.buffer().tell()
    }

    /// See [`Buffer::size`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn size(&self) -> Result<usize> {
        self.buffer().size()
    }

    /// See [`Buffer::remaining`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn remaining(&self) -> Result<usize> {
        self.buffer().remaining()
    }

    /// See [`Buffer::peek`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn peek(&self, n: usize) -> Result<&[u8]> {
        self.buffer().peek(n)
    }

    /// See [`Buffer::seekpeek`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn seekpeek(&self, offset: usize, n: usize) -> Result<&[u8]> {
        self.buffer().seekpeek(offset, n)
    }

    /// See [`Buffer::search`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn search(&self, pattern: &[u8]) -> Result<Option<usize>> {
        self.buffer().search(pattern)
    }

    /// See [`Buffer::rsearch`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn rsearch(&self, pattern: &[u8]) -> Result<Option<usize>> {
        self.buffer().rsearch(pattern)
    }

    /// New independent facade over a copy of `[start, end)`, cursor at 0, same configuration.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn substream(&self, start: usize, end: usize) -> Result<Self> {
        let buffer = self.buffer().substream(start, end)?;
        Ok(Self::from_parts(buffer, *self.config()))
    }

    /// See [`Buffer::clear`]. The configuration is retained.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn clear(&mut self) -> Result<()> {
        self.buffer_mut().clear()
    }
}

/// Decoding operations.
pub trait ReadData: Stream {
    /// Read up to `n` raw bytes, see [`Buffer::read`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn read(&mut self, n: usize) -> Result<&[u8]> {
        self.buffer_mut().read(n)
    }

    /// Read any [`FixedWidth`] value in the stream's byte order.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if too few bytes remain; the cursor is unchanged.
    fn read_value<T: FixedWidth>(&mut self) -> Result<T> {
        let order = self.byte_order();
        read_value(self.buffer_mut(), order)
    }

    /// Read a signed 8-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] at the end of the buffer.
    fn read_i8(&mut self) -> Result<i8> {
        self.read_value()
    }

    /// Read an unsigned 8-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] at the end of the buffer.
    fn read_u8(&mut self) -> Result<u8> {
        self.read_value()
    }

    /// Read a signed 16-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if fewer than 2 bytes remain.
    fn read_i16(&mut self) -> Result<i16> {
        self.read_value()
    }

    /// Read an unsigned 16-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if fewer than 2 bytes remain.
    fn read_u16(&mut self) -> Result<u16> {
        self.read_value()
    }

    /// Read a signed 32-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if fewer than 4 bytes remain.
    fn read_i32(&mut self) -> Result<i32> {
        self.read_value()
    }

    /// Read an unsigned 32-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if fewer than 4 bytes remain.
    fn read_u32(&mut self) -> Result<u32> {
        self.read_value()
    }

    /// Read a signed 64-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if fewer than 8 bytes remain.
    fn read_i64(&mut self) -> Result<i64> {
        self.read_value()
    }

    /// Read an unsigned 64-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if fewer than 8 bytes remain.
    fn read_u64(&mut self) -> Result<u64> {
        self.read_value()
    }

    /// Read an IEEE-754 single precision float.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if fewer than 4 bytes remain.
    fn read_f32(&mut self) -> Result<f32> {
        self.read_value()
    }

    /// Read an IEEE-754 double precision float.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if fewer than 8 bytes remain.
    fn read_f64(&mut self) -> Result<f64> {
        self.read_value()
    }

    /// Read one byte as a boolean, any nonzero value is `true`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] at the end of the buffer.
    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Generic entry point: decode a value of `kind`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if too few bytes remain.
    fn read_field(&mut self, kind: FieldKind) -> Result<Value> {
        let order = self.byte_order();
        kind.read(self.buffer_mut(), order)
    }

    /// Decode a value described by a single-field `struct` descriptor such as `"I"` or `">h"`.
    ///
    /// A byte-order prefix applies to this call only.
    ///
    /// # Errors
    /// Returns [`crate::Error::Format`] for an invalid descriptor, or
    /// [`crate::Error::Underflow`] if too few bytes remain.
    fn read_format(&mut self, descriptor: &str) -> Result<Value> {
        let (order, kind) = parse_format(descriptor)?;
        let order = order.unwrap_or(self.byte_order());
        kind.read(self.buffer_mut(), order)
    }

    /// Decode an unbounded ULEB128 value. Only use this on trusted input.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if the buffer ends before a terminal byte.
    fn read_uleb128(&mut self) -> Result<u64> {
        leb128::read_uleb128(self.buffer_mut(), None)
    }

    /// Decode a ULEB128 value consuming at most `max_bytes` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if the buffer ends before a terminal byte and the cap.
    fn read_uleb128_bounded(&mut self, max_bytes: usize) -> Result<u64> {
        leb128::read_uleb128(self.buffer_mut(), Some(max_bytes))
    }

    /// Decode a ULEB128 value capped at the configured [`VarintLimits::uleb128_max_bytes`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if the buffer ends before a terminal byte and the cap.
    fn read_uleb128_safe(&mut self) -> Result<u64> {
        let max = self.limits().uleb128_max_bytes;
        self.read_uleb128_bounded(max)
    }

    /// Decode an unbounded ULEB128p1 value (decoded value plus one).
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] like [`ReadData::read_uleb128`], or
    /// [`crate::Error::OutOfRange`] if the bias overflows.
    fn read_uleb128p1(&mut self) -> Result<u64> {
        leb128::read_uleb128p1(self.buffer_mut(), None)
    }

    /// Decode a ULEB128p1 value consuming at most `max_bytes` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] or [`crate::Error::OutOfRange`].
    fn read_uleb128p1_bounded(&mut self, max_bytes: usize) -> Result<u64> {
        leb128::read_uleb128p1(self.buffer_mut(), Some(max_bytes))
    }

    /// Decode a ULEB128p1 value capped at the configured ULEB128 limit.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] or [`crate::Error::OutOfRange`].
    fn read_uleb128p1_safe(&mut self) -> Result<u64> {
        let max = self.limits().uleb128_max_bytes;
        self.read_uleb128p1_bounded(max)
    }

    /// Decode an unbounded SLEB128 value. Only use this on trusted input.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if the buffer ends before a terminal byte.
    fn read_sleb128(&mut self) -> Result<i64> {
        leb128::read_sleb128(self.buffer_mut(), None)
    }

    /// Decode a SLEB128 value consuming at most `max_bytes` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if the buffer ends before a terminal byte and the cap.
    fn read_sleb128_bounded(&mut self, max_bytes: usize) -> Result<i64> {
        leb128::read_sleb128(self.buffer_mut(), Some(max_bytes))
    }

    /// Decode a SLEB128 value capped at the configured [`VarintLimits::sleb128_max_bytes`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if the buffer ends before a terminal byte and the cap.
    fn read_sleb128_safe(&mut self) -> Result<i64> {
        let max = self.limits().sleb128_max_bytes;
        self.read_sleb128_bounded(max)
    }

    /// Consume bytes up to and including the first occurrence of `delimiter`.
    ///
    /// # Errors
    /// Returns [`crate::Error::DelimiterNotFound`] if the delimiter does not occur between the
    /// cursor and the end of the buffer (an empty delimiter never occurs). The cursor is left
    /// unchanged in that case.
    fn read_until(&mut self, delimiter: &[u8]) -> Result<Vec<u8>> {
        let start = self.tell()?;
        let Some(found) = self.search(delimiter)? else {
            return Err(Error::DelimiterNotFound);
        };

        let consumed = self.read(found - start + delimiter.len())?;
        Ok(consumed.to_vec())
    }
}

/// Encoding operations.
pub trait WriteData: Stream {
    /// Write raw bytes at the cursor, see [`Buffer::write`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.buffer_mut().write(bytes)
    }

    /// Full contents of the buffer regardless of the cursor position.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn bytes(&self) -> Result<&[u8]> {
        self.buffer().as_slice()
    }

    /// Write any [`FixedWidth`] value in the stream's byte order.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_value<T: FixedWidth>(&mut self, value: T) -> Result<()> {
        let order = self.byte_order();
        write_value(self.buffer_mut(), value, order)
    }

    /// Write a signed 8-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_value(value)
    }

    /// Write an unsigned 8-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_value(value)
    }

    /// Write a signed 16-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_value(value)
    }

    /// Write an unsigned 16-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_value(value)
    }

    /// Write a signed 32-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_value(value)
    }

    /// Write an unsigned 32-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_value(value)
    }

    /// Write a signed 64-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_value(value)
    }

    /// Write an unsigned 64-bit integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_value(value)
    }

    /// Write an IEEE-754 single precision float.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_value(value)
    }

    /// Write an IEEE-754 double precision float.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_value(value)
    }

    /// Write a boolean as exactly `0` or `1`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    /// Generic entry point: encode `value` as `kind`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the value does not fit `kind`, or
    /// [`crate::Error::Format`] if its category does not match.
    fn write_field(&mut self, kind: FieldKind, value: impl Into<Value>) -> Result<()> {
        let order = self.byte_order();
        kind.write(self.buffer_mut(), value.into(), order)
    }

    /// Range-checked integer encode, see [`FieldKind::write_integer`].
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `value` is not representable by `kind`.
    fn write_integer(&mut self, kind: FieldKind, value: i128) -> Result<()> {
        let order = self.byte_order();
        kind.write_integer(self.buffer_mut(), value, order)
    }

    /// Encode `value` as described by a single-field `struct` descriptor.
    ///
    /// A byte-order prefix applies to this call only.
    ///
    /// # Errors
    /// Returns [`crate::Error::Format`] for an invalid descriptor or a mismatched value, or
    /// [`crate::Error::OutOfRange`] if the value does not fit.
    fn write_format(&mut self, descriptor: &str, value: impl Into<Value>) -> Result<()> {
        let (order, kind) = parse_format(descriptor)?;
        let order = order.unwrap_or(self.byte_order());
        kind.write(self.buffer_mut(), value.into(), order)
    }

    /// Encode the complete ULEB128 form of `value`, returning the number of bytes written.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_uleb128(&mut self, value: u64) -> Result<usize> {
        leb128::write_uleb128(self.buffer_mut(), value, None)
    }

    /// Encode at most `max_bytes` bytes of the ULEB128 form of `value`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_uleb128_bounded(&mut self, value: u64, max_bytes: usize) -> Result<usize> {
        leb128::write_uleb128(self.buffer_mut(), value, Some(max_bytes))
    }

    /// Encode `value` as ULEB128 capped at the configured ULEB128 limit.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_uleb128_safe(&mut self, value: u64) -> Result<usize> {
        let max = self.limits().uleb128_max_bytes;
        self.write_uleb128_bounded(value, max)
    }

    /// Encode the complete SLEB128 form of `value`, returning the number of bytes written.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_sleb128(&mut self, value: i64) -> Result<usize> {
        leb128::write_sleb128(self.buffer_mut(), value, None)
    }

    /// Encode at most `max_bytes` bytes of the SLEB128 form of `value`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_sleb128_bounded(&mut self, value: i64, max_bytes: usize) -> Result<usize> {
        leb128::write_sleb128(self.buffer_mut(), value, Some(max_bytes))
    }

    /// Encode `value` as SLEB128 capped at the configured SLEB128 limit.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    fn write_sleb128_safe(&mut self, value: i64) -> Result<usize> {
        let max = self.limits().sleb128_max_bytes;
        self.write_sleb128_bounded(value, max)
    }
}
