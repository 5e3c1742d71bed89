//! Byte-order aware fixed-width numeric codec.
//!
//! This module provides the [`crate::stream::io::FixedWidth`] trait together with the functions
//! that pack and unpack signed/unsigned 8/16/32/64-bit integers and IEEE-754 floats according
//! to a [`crate::ByteOrder`]. Nothing here holds state: every function consumes or produces
//! bytes through a [`crate::Buffer`] or a plain slice.
//!
//! # Key Components
//!
//! - [`crate::stream::io::FixedWidth`] - Conversion between a primitive and its byte array
//! - [`crate::stream::io::decode`] / [`crate::stream::io::encode`] - Slice level conversion
//! - [`crate::stream::io::read_value`] / [`crate::stream::io::write_value`] - Cursor based access
//!
//! # Examples
//!
//! ```rust
//! use datastream::{stream::io::{decode, encode}, ByteOrder};
//!
//! assert_eq!(encode(1.0f32, ByteOrder::Big).as_ref(), &[0x3F, 0x80, 0x00, 0x00]);
//! assert_eq!(encode(1.0f32, ByteOrder::Little).as_ref(), &[0x00, 0x00, 0x80, 0x3F]);
//!
//! let value: i32 = decode(&[0xFF, 0xFF, 0xFF, 0xFF], ByteOrder::Network)?;
//! assert_eq!(value, -1);
//! # Ok::<(), datastream::Error>(())
//! ```
//!
//! # Error Handling
//!
//! Decoding from fewer than `size_of::<T>()` bytes returns [`crate::Error::Underflow`]. When
//! reading through a [`crate::Buffer`] the cursor is not moved in that case.

use crate::{Buffer, ByteOrder, Result};

/// Trait for primitive types with a fixed-width, byte-order dependent wire representation.
///
/// Each implementation names the byte array holding its encoding (e.g. `[u8; 4]` for `u32`)
/// and the conversions from and to that array in both byte orders.
pub trait FixedWidth: Sized + Copy {
    /// Byte array holding the encoded value.
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Encoded width in bytes.
    const SIZE: usize;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
    /// Write T to a byte buffer in big-endian
    fn to_be_bytes(self) -> Self::Bytes;
}

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedWidth for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                const SIZE: usize = std::mem::size_of::<$ty>();

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )*
    };
}

impl_fixed_width!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Decode a `T` from the first `T::SIZE` bytes of `data`.
///
/// # Errors
/// Returns [`crate::Error::Underflow`] if `data` is shorter than `T::SIZE`.
pub fn decode<T: FixedWidth>(data: &[u8], order: ByteOrder) -> Result<T> {
    let Some(Ok(bytes)) = data.get(..T::SIZE).map(TryInto::try_into) else {
        return Err(underflow_error!(T::SIZE, data.len()));
    };

    Ok(if order.is_big_endian() {
        T::from_be_bytes(bytes)
    } else {
        T::from_le_bytes(bytes)
    })
}

/// Encode `value` into exactly `T::SIZE` bytes.
pub fn encode<T: FixedWidth>(value: T, order: ByteOrder) -> T::Bytes {
    if order.is_big_endian() {
        value.to_be_bytes()
    } else {
        value.to_le_bytes()
    }
}

/// Decode a `T` at the cursor of `buffer` and advance past it.
///
/// # Errors
/// Returns [`crate::Error::Underflow`] if fewer than `T::SIZE` bytes remain, leaving the cursor
/// unchanged, or [`crate::Error::Uninitialized`] on a detached buffer.
pub fn read_value<T: FixedWidth>(buffer: &mut Buffer, order: ByteOrder) -> Result<T> {
    let bytes = buffer.read_exact(T::SIZE)?;
    decode(bytes, order)
}

/// Encode `value` at the cursor of `buffer` and advance past it.
///
/// # Errors
/// Returns [`crate::Error::Uninitialized`] on a detached buffer.
pub fn write_value<T: FixedWidth>(buffer: &mut Buffer, value: T, order: ByteOrder) -> Result<()> {
    buffer.write(encode(value, order).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use strum::IntoEnumIterator;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn decode_le_u16() {
        let result = decode::<u16>(&TEST_BUFFER, ByteOrder::Little).unwrap();
        assert_eq!(result, 0x0201);
    }

    #[test]
    fn decode_le_u32() {
        let result = decode::<u32>(&TEST_BUFFER, ByteOrder::Little).unwrap();
        assert_eq!(result, 0x0403_0201);
    }

    #[test]
    fn decode_le_i64() {
        let result = decode::<i64>(&TEST_BUFFER, ByteOrder::Little).unwrap();
        assert_eq!(result, 0x0807060504030201);
    }

    #[test]
    fn decode_be_u16() {
        let result = decode::<u16>(&TEST_BUFFER, ByteOrder::Big).unwrap();
        assert_eq!(result, 0x102);
    }

    #[test]
    fn decode_be_u32() {
        let result = decode::<u32>(&TEST_BUFFER, ByteOrder::Network).unwrap();
        assert_eq!(result, 0x1020304);
    }

    #[test]
    fn decode_be_u64() {
        let result = decode::<u64>(&TEST_BUFFER, ByteOrder::Big).unwrap();
        assert_eq!(result, 0x102030405060708);
    }

    #[test]
    fn decode_be_f32() {
        let result = decode::<f32>(&TEST_BUFFER, ByteOrder::Big).unwrap();
        assert_eq!(result, 2.3879393e-38);
    }

    #[test]
    fn decode_le_f64() {
        let result = decode::<f64>(&TEST_BUFFER, ByteOrder::Little).unwrap();
        assert_eq!(result, 5.447603722011605e-270);
    }

    #[test]
    fn decode_native_matches_host() {
        let result = decode::<u32>(&TEST_BUFFER, ByteOrder::Native).unwrap();
        assert_eq!(result, u32::from_ne_bytes([0x01, 0x02, 0x03, 0x04]));
    }

    #[test]
    fn decode_short() {
        assert!(matches!(
            decode::<u32>(&TEST_BUFFER[..2], ByteOrder::Little),
            Err(Error::Underflow {
                needed: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn encode_float_layout() {
        assert_eq!(encode(1.0f32, ByteOrder::Big), [0x3F, 0x80, 0x00, 0x00]);
        assert_eq!(encode(1.0f32, ByteOrder::Little), [0x00, 0x00, 0x80, 0x3F]);
        assert_eq!(
            encode(1.0f64, ByteOrder::Little),
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F]
        );
    }

    #[test]
    fn unsigned_bits_read_as_signed() {
        for order in ByteOrder::iter() {
            let mut buffer = Buffer::new();
            write_value(&mut buffer, 0xFFFF_FFFFu32, order).unwrap();
            buffer.seek(std::io::SeekFrom::Start(0)).unwrap();
            assert_eq!(read_value::<i32>(&mut buffer, order).unwrap(), -1);
        }
    }

    #[test]
    fn read_value_underflow_keeps_cursor() {
        let mut buffer = Buffer::from(vec![0x01, 0x02]);
        assert!(read_value::<u32>(&mut buffer, ByteOrder::Little).is_err());
        assert_eq!(buffer.tell().unwrap(), 0);
        assert_eq!(read_value::<u16>(&mut buffer, ByteOrder::Little).unwrap(), 0x0201);
    }
}
