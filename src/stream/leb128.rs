//! ULEB128, ULEB128p1 and SLEB128 variable-length integer codec.
//!
//! LEB128 stores an integer as a sequence of 7-bit groups, least significant group first. The
//! top bit of every byte is a continuation flag: set means another group follows, clear marks
//! the terminal group. The encoding is independent of the stream's [`crate::ByteOrder`].
//!
//! # Decode modes
//!
//! Every decoder takes a `max_bytes: Option<usize>` bound:
//!
//! - `None` (*unbounded*) reads until a terminal byte appears. Only use this on trusted input:
//!   a stream without a terminal byte is consumed to its end.
//! - `Some(n)` (*bounded*) reads at most `n` bytes **in total**, counting the first and the
//!   terminal byte. When the cap is reached before a terminal byte, decoding stops and the
//!   value accumulated so far is returned. This is a best-effort cap, not an error; callers
//!   that need strict rejection must compare the consumed byte count (cursor delta) against
//!   what they expected. A cap of zero returns 0 without consuming anything.
//!
//! Running out of buffer before either a terminal byte or the cap is an
//! [`crate::Error::Underflow`], and the cursor is restored to where the decode started.
//!
//! Values are accumulated into 64 bits. Groups beyond bit 63 of an overlong encoding are
//! discarded.
//!
//! # Encode bound
//!
//! Encoders take the same `max_bytes` bound and emit at most that many bytes (silent
//! truncation). `None` and any cap of at least [`MAX_LEB128_LEN`] always produce the complete
//! encoding of a 64-bit value.
//!
//! - ULEB128 output is the prefix of the full encoding, so a truncated value ends on a byte
//!   with its continuation bit set.
//! - SLEB128 output always ends on a terminal byte: when the cap is reached, the current group
//!   is written without its continuation bit. A capped field therefore stays self-delimiting
//!   and the bytes following it are never absorbed by the next decode.
//!
//! # Examples
//!
//! ```rust
//! use datastream::{stream::leb128, Buffer};
//! use std::io::SeekFrom;
//!
//! let mut buffer = Buffer::new();
//! leb128::write_uleb128(&mut buffer, 624_485, None)?;
//! leb128::write_sleb128(&mut buffer, -123_456, None)?;
//! assert_eq!(buffer.as_slice()?, &[0xE5, 0x8E, 0x26, 0xC0, 0xBB, 0x78]);
//!
//! buffer.seek(SeekFrom::Start(0))?;
//! assert_eq!(leb128::read_uleb128(&mut buffer, None)?, 624_485);
//! assert_eq!(leb128::read_sleb128(&mut buffer, Some(5))?, -123_456);
//! # Ok::<(), datastream::Error>(())
//! ```

use crate::{Buffer, Error, Result};

/// Longest complete encoding of a 64-bit value (ten 7-bit groups).
pub const MAX_LEB128_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7F;
const SIGN: u8 = 0x40;

/// Outcome of walking the 7-bit groups of one encoded integer.
struct Groups {
    /// Accumulated payload bits
    value: u64,
    /// Number of payload bits consumed
    bits: u32,
    /// Terminal byte, `None` when the cap cut the sequence short
    terminal: Option<u8>,
}

fn shifted(byte: u8, shift: u32) -> u64 {
    u64::from(byte).checked_shl(shift).unwrap_or(0)
}

fn read_groups(buffer: &mut Buffer, max_bytes: Option<usize>) -> Result<Groups> {
    buffer.transactional(|buffer| {
        let mut groups = Groups {
            value: 0,
            bits: 0,
            terminal: None,
        };

        let mut consumed = 0usize;
        loop {
            if max_bytes.is_some_and(|max| consumed >= max) {
                if consumed > 0 {
                    tracing::trace!(
                        max_bytes = consumed,
                        value = groups.value,
                        "bounded leb128 decode reached its byte cap"
                    );
                }
                return Ok(groups);
            }

            let byte = buffer.read_byte()?;
            consumed += 1;

            if byte & CONTINUATION == 0 {
                // The terminal byte enters unmasked; its top bit is clear by definition.
                groups.value |= shifted(byte, groups.bits);
                groups.bits = groups.bits.saturating_add(7);
                groups.terminal = Some(byte);
                return Ok(groups);
            }

            groups.value |= shifted(byte & PAYLOAD, groups.bits);
            groups.bits = groups.bits.saturating_add(7);
        }
    })
}

/// Decode an unsigned LEB128 integer at the cursor.
///
/// # Errors
/// Returns [`crate::Error::Underflow`] if the buffer ends before a terminal byte and before
/// the cap; the cursor is restored in that case.
pub fn read_uleb128(buffer: &mut Buffer, max_bytes: Option<usize>) -> Result<u64> {
    Ok(read_groups(buffer, max_bytes)?.value)
}

/// Decode an unsigned LEB128 integer and add the `+1` bias of the ULEB128p1 variant.
///
/// The bias only applies to the decoded value; the wire format is plain ULEB128.
///
/// # Errors
/// Returns [`crate::Error::Underflow`] like [`read_uleb128`], or
/// [`crate::Error::OutOfRange`] if the wire value is `u64::MAX` and the bias would overflow.
pub fn read_uleb128p1(buffer: &mut Buffer, max_bytes: Option<usize>) -> Result<u64> {
    let start = buffer.tell()?;
    let value = read_uleb128(buffer, max_bytes)?;

    match value.checked_add(1) {
        Some(biased) => Ok(biased),
        None => {
            buffer.seek(std::io::SeekFrom::Start(start as u64))?;
            Err(Error::OutOfRange {
                kind: "uleb128p1",
                value: format!("{value} + 1"),
            })
        }
    }
}

/// Decode a signed LEB128 integer at the cursor.
///
/// If the terminal group carries the sign bit (`0x40`), every bit above the consumed groups is
/// set. A decode capped before its terminal byte is returned without sign extension.
///
/// # Errors
/// Returns [`crate::Error::Underflow`] if the buffer ends before a terminal byte and before
/// the cap; the cursor is restored in that case.
pub fn read_sleb128(buffer: &mut Buffer, max_bytes: Option<usize>) -> Result<i64> {
    let groups = read_groups(buffer, max_bytes)?;

    let mut value = groups.value;
    if let Some(terminal) = groups.terminal {
        if terminal & SIGN != 0 && groups.bits < u64::BITS {
            value |= u64::MAX << groups.bits;
        }
    }

    Ok(value as i64)
}

fn encode_unsigned(mut value: u64, max_bytes: Option<usize>, out: &mut [u8; MAX_LEB128_LEN]) -> usize {
    let mut len = 0;
    loop {
        if max_bytes.is_some_and(|max| len >= max) {
            tracing::trace!(max_bytes = len, "bounded uleb128 encode truncated");
            return len;
        }

        let byte = (value & u64::from(PAYLOAD)) as u8;
        value >>= 7;

        if value == 0 {
            out[len] = byte;
            return len + 1;
        }

        out[len] = byte | CONTINUATION;
        len += 1;
    }
}

fn encode_signed(mut value: i64, max_bytes: Option<usize>, out: &mut [u8; MAX_LEB128_LEN]) -> usize {
    if max_bytes == Some(0) {
        return 0;
    }

    let mut len = 0;
    loop {
        let byte = (value & i64::from(PAYLOAD)) as u8;

        // Positive values stop once they fit in 6 bits, negative ones once they fit in 6 bits
        // plus sign, so the terminal group's bit 6 matches the sign of the original value.
        let last = if value >= 0 {
            value <= 0x3F
        } else {
            value >= -0x40
        };

        if last {
            out[len] = byte;
            return len + 1;
        }

        // The final byte allowed by the cap is always emitted as a terminal group.
        if max_bytes.is_some_and(|max| len + 1 >= max) {
            tracing::trace!(max_bytes = len + 1, "bounded sleb128 encode truncated");
            out[len] = byte;
            return len + 1;
        }

        out[len] = byte | CONTINUATION;
        len += 1;
        value >>= 7;
    }
}

/// Encode `value` as unsigned LEB128 into a new vector.
///
/// # Examples
///
/// ```rust
/// use datastream::stream::leb128::encode_uleb128;
///
/// assert_eq!(encode_uleb128(0, None), [0x00]);
/// assert_eq!(encode_uleb128(128, None), [0x80, 0x01]);
/// assert_eq!(encode_uleb128(128, Some(1)), [0x80]);
/// ```
#[must_use]
pub fn encode_uleb128(value: u64, max_bytes: Option<usize>) -> Vec<u8> {
    let mut out = [0u8; MAX_LEB128_LEN];
    let len = encode_unsigned(value, max_bytes, &mut out);
    out[..len].to_vec()
}

/// Encode `value` as signed LEB128 into a new vector.
#[must_use]
pub fn encode_sleb128(value: i64, max_bytes: Option<usize>) -> Vec<u8> {
    let mut out = [0u8; MAX_LEB128_LEN];
    let len = encode_signed(value, max_bytes, &mut out);
    out[..len].to_vec()
}

/// Number of bytes the complete unsigned encoding of `value` occupies.
#[must_use]
pub fn uleb128_size(value: u64) -> usize {
    let significant = u64::BITS - value.leading_zeros();
    (significant.max(1) as usize).div_ceil(7)
}

/// Number of bytes the complete signed encoding of `value` occupies.
#[must_use]
pub fn sleb128_size(value: i64) -> usize {
    let mut out = [0u8; MAX_LEB128_LEN];
    encode_signed(value, None, &mut out)
}

/// Encode `value` as unsigned LEB128 at the cursor, returning the number of bytes written.
///
/// # Errors
/// Returns [`crate::Error::Uninitialized`] on a detached buffer.
pub fn write_uleb128(buffer: &mut Buffer, value: u64, max_bytes: Option<usize>) -> Result<usize> {
    let mut out = [0u8; MAX_LEB128_LEN];
    let len = encode_unsigned(value, max_bytes, &mut out);
    buffer.write(&out[..len])?;
    Ok(len)
}

/// Encode `value` as signed LEB128 at the cursor, returning the number of bytes written.
///
/// # Errors
/// Returns [`crate::Error::Uninitialized`] on a detached buffer.
pub fn write_sleb128(buffer: &mut Buffer, value: i64, max_bytes: Option<usize>) -> Result<usize> {
    let mut out = [0u8; MAX_LEB128_LEN];
    let len = encode_signed(value, max_bytes, &mut out);
    buffer.write(&out[..len])?;
    Ok(len)
}
