//! Closed set of fixed-width field kinds and the generic read/write entry points.
//!
//! Rather than interpreting a format string at run time, every supported combination of width,
//! signedness and float-ness is a [`crate::stream::FieldKind`] variant mapped to an explicit
//! encode/decode pair. The single-character `struct` layout codes are still accepted through
//! [`crate::stream::FieldKind::from_code`] so existing format descriptors keep working.
//!
//! | Kind      | Code      | Width |
//! |-----------|-----------|-------|
//! | `Int8`    | `b`       | 1     |
//! | `UInt8`   | `B`       | 1     |
//! | `Bool`    | `?`       | 1     |
//! | `Int16`   | `h`       | 2     |
//! | `UInt16`  | `H`       | 2     |
//! | `Int32`   | `i`, `l`  | 4     |
//! | `UInt32`  | `I`, `L`  | 4     |
//! | `Int64`   | `q`       | 8     |
//! | `UInt64`  | `Q`       | 8     |
//! | `Float32` | `f`       | 4     |
//! | `Float64` | `d`       | 8     |

use std::{fmt, str::FromStr};

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

use crate::{
    stream::io::{read_value, write_value},
    Buffer, ByteOrder, Error, Result,
};

/// A fixed-width field descriptor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum FieldKind {
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 8-bit integer
    UInt8,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    UInt16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer
    UInt64,
    /// IEEE-754 single precision
    Float32,
    /// IEEE-754 double precision
    Float64,
    /// One byte, 0 is `false`, anything else is `true`
    Bool,
}

impl FieldKind {
    /// Encoded width in bytes.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            FieldKind::Int8 | FieldKind::UInt8 | FieldKind::Bool => 1,
            FieldKind::Int16 | FieldKind::UInt16 => 2,
            FieldKind::Int32 | FieldKind::UInt32 | FieldKind::Float32 => 4,
            FieldKind::Int64 | FieldKind::UInt64 | FieldKind::Float64 => 8,
        }
    }

    /// Canonical `struct` layout code of this kind.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            FieldKind::Int8 => 'b',
            FieldKind::UInt8 => 'B',
            FieldKind::Int16 => 'h',
            FieldKind::UInt16 => 'H',
            FieldKind::Int32 => 'i',
            FieldKind::UInt32 => 'I',
            FieldKind::Int64 => 'q',
            FieldKind::UInt64 => 'Q',
            FieldKind::Float32 => 'f',
            FieldKind::Float64 => 'd',
            FieldKind::Bool => '?',
        }
    }

    /// Map a `struct` layout code to its kind.
    ///
    /// # Errors
    /// Returns [`crate::Error::Format`] for codes outside the supported set.
    pub fn from_code(code: char) -> Result<Self> {
        Ok(match code {
            'b' => FieldKind::Int8,
            'B' => FieldKind::UInt8,
            'h' => FieldKind::Int16,
            'H' => FieldKind::UInt16,
            'i' | 'l' => FieldKind::Int32,
            'I' | 'L' => FieldKind::UInt32,
            'q' => FieldKind::Int64,
            'Q' => FieldKind::UInt64,
            'f' => FieldKind::Float32,
            'd' => FieldKind::Float64,
            '?' => FieldKind::Bool,
            _ => return Err(format_error!("Unsupported format code - {:?}", code)),
        })
    }

    /// Inclusive integer range of this kind, `None` for floats and bools.
    #[must_use]
    pub const fn int_range(self) -> Option<(i128, i128)> {
        match self {
            FieldKind::Int8 => Some((i8::MIN as i128, i8::MAX as i128)),
            FieldKind::UInt8 => Some((0, u8::MAX as i128)),
            FieldKind::Int16 => Some((i16::MIN as i128, i16::MAX as i128)),
            FieldKind::UInt16 => Some((0, u16::MAX as i128)),
            FieldKind::Int32 => Some((i32::MIN as i128, i32::MAX as i128)),
            FieldKind::UInt32 => Some((0, u32::MAX as i128)),
            FieldKind::Int64 => Some((i64::MIN as i128, i64::MAX as i128)),
            FieldKind::UInt64 => Some((0, u64::MAX as i128)),
            FieldKind::Float32 | FieldKind::Float64 | FieldKind::Bool => None,
        }
    }

    /// Decode a value of this kind at the cursor.
    ///
    /// # Errors
    /// Returns [`crate::Error::Underflow`] if fewer than [`FieldKind::size`] bytes remain.
    pub fn read(self, buffer: &mut Buffer, order: ByteOrder) -> Result<Value> {
        Ok(match self {
            FieldKind::Int8 => Value::Int(read_value::<i8>(buffer, order)?.into()),
            FieldKind::UInt8 => Value::Int(read_value::<u8>(buffer, order)?.into()),
            FieldKind::Int16 => Value::Int(read_value::<i16>(buffer, order)?.into()),
            FieldKind::UInt16 => Value::Int(read_value::<u16>(buffer, order)?.into()),
            FieldKind::Int32 => Value::Int(read_value::<i32>(buffer, order)?.into()),
            FieldKind::UInt32 => Value::Int(read_value::<u32>(buffer, order)?.into()),
            FieldKind::Int64 => Value::Int(read_value::<i64>(buffer, order)?.into()),
            FieldKind::UInt64 => Value::Int(read_value::<u64>(buffer, order)?.into()),
            FieldKind::Float32 => Value::Float(read_value::<f32>(buffer, order)?.into()),
            FieldKind::Float64 => Value::Float(read_value::<f64>(buffer, order)?),
            FieldKind::Bool => Value::Bool(read_value::<u8>(buffer, order)? != 0),
        })
    }

    /// Encode `value` as this kind at the cursor.
    ///
    /// Integers are range checked against the kind, never wrapped. A float value for
    /// `Float32` must be finite and within `f32` range, or infinite/NaN.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the value does not fit, or
    /// [`crate::Error::Format`] if the value category does not match the kind.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write(self, buffer: &mut Buffer, value: Value, order: ByteOrder) -> Result<()> {
        match (self, value) {
            (FieldKind::Float64, Value::Float(v)) => write_value(buffer, v, order),
            (FieldKind::Float32, Value::Float(v)) => {
                if v.is_finite() && v.abs() > f64::from(f32::MAX) {
                    return Err(self.out_of_range(v));
                }
                write_value(buffer, v as f32, order)
            }
            (FieldKind::Bool, Value::Bool(v)) => write_value(buffer, u8::from(v), order),
            (FieldKind::Float32 | FieldKind::Float64 | FieldKind::Bool, other) => Err(
                format_error!("Value {} can not be encoded as {}", other, self),
            ),
            (_, Value::Int(v)) => self.write_integer(buffer, v, order),
            (_, other) => Err(format_error!(
                "Value {} can not be encoded as {}",
                other,
                self
            )),
        }
    }

    /// Range-checked integer encode.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `value` is not representable by this kind, or
    /// [`crate::Error::Format`] if this kind is not an integer kind.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn write_integer(self, buffer: &mut Buffer, value: i128, order: ByteOrder) -> Result<()> {
        let Some((min, max)) = self.int_range() else {
            return Err(format_error!("{} is not an integer kind", self));
        };
        if value < min || value > max {
            return Err(self.out_of_range(value));
        }

        // The range check above makes every narrowing cast below lossless.
        match self {
            FieldKind::Int8 => write_value(buffer, value as i8, order),
            FieldKind::UInt8 => write_value(buffer, value as u8, order),
            FieldKind::Int16 => write_value(buffer, value as i16, order),
            FieldKind::UInt16 => write_value(buffer, value as u16, order),
            FieldKind::Int32 => write_value(buffer, value as i32, order),
            FieldKind::UInt32 => write_value(buffer, value as u32, order),
            FieldKind::Int64 => write_value(buffer, value as i64, order),
            FieldKind::UInt64 => write_value(buffer, value as u64, order),
            FieldKind::Float32 | FieldKind::Float64 | FieldKind::Bool => {
                Err(format_error!("{} is not an integer kind", self))
            }
        }
    }

    fn out_of_range(self, value: impl fmt::Display) -> Error {
        Error::OutOfRange {
            kind: self.into(),
            value: value.to_string(),
        }
    }
}

impl TryFrom<char> for FieldKind {
    type Error = Error;

    fn try_from(code: char) -> Result<Self> {
        FieldKind::from_code(code)
    }
}

impl FromStr for FieldKind {
    type Err = Error;

    /// Parse a single-field descriptor such as `"I"`, `"<q"` or `"!d"`.
    ///
    /// A leading byte-order prefix is accepted and ignored here; use [`parse_format`] to keep it.
    fn from_str(s: &str) -> Result<Self> {
        parse_format(s).map(|(_, kind)| kind)
    }
}

/// Split a single-field descriptor into its optional byte-order prefix and its kind.
///
/// # Errors
/// Returns [`crate::Error::Format`] if the descriptor is empty, holds more than one field, or
/// uses an unsupported code.
///
/// # Examples
///
/// ```rust
/// use datastream::{stream::parse_format, ByteOrder, FieldKind};
///
/// assert_eq!(parse_format("q")?, (None, FieldKind::Int64));
/// assert_eq!(parse_format(">H")?, (Some(ByteOrder::Big), FieldKind::UInt16));
/// assert!(parse_format("z").is_err());
/// # Ok::<(), datastream::Error>(())
/// ```
pub fn parse_format(descriptor: &str) -> Result<(Option<ByteOrder>, FieldKind)> {
    let mut chars = descriptor.chars();
    let Some(first) = chars.next() else {
        return Err(format_error!("Empty format descriptor"));
    };

    let (order, code) = match ByteOrder::from_token(first) {
        Some(order) => (Some(order), chars.next()),
        None => (None, Some(first)),
    };

    let Some(code) = code else {
        return Err(format_error!("Missing format code - {:?}", descriptor));
    };
    if chars.next().is_some() {
        return Err(format_error!(
            "Only single-field descriptors are supported - {:?}",
            descriptor
        ));
    }

    Ok((order, FieldKind::from_code(code)?))
}

/// A decoded fixed-width value.
///
/// Integers of every width are carried as `i128`, which holds both the full `u64` and `i64`
/// ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Any integer kind
    Int(i128),
    /// `Float32` (widened) or `Float64`
    Float(f64),
    /// `Bool`
    Bool(bool),
}

impl Value {
    /// Returns the integer payload, if this is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i128> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a float.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a bool.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(value.into())
                }
            }
        )*
    };
}

impl_value_from_int!(i8, u8, i16, u16, i32, u32, i64, u64, i128);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::SeekFrom;
    use strum::IntoEnumIterator;

    #[test]
    fn code_roundtrip() {
        for kind in FieldKind::iter() {
            assert_eq!(FieldKind::from_code(kind.code()).unwrap(), kind);
        }
        assert_eq!(FieldKind::from_code('l').unwrap(), FieldKind::Int32);
        assert_eq!(FieldKind::from_code('L').unwrap(), FieldKind::UInt32);
        assert!(matches!(FieldKind::from_code('z'), Err(Error::Format { .. })));
    }

    #[test]
    fn parse_descriptors() {
        assert_eq!("!i".parse::<FieldKind>().unwrap(), FieldKind::Int32);
        assert_eq!(
            parse_format("<d").unwrap(),
            (Some(ByteOrder::Little), FieldKind::Float64)
        );
        assert!(parse_format("").is_err());
        assert!(parse_format("<").is_err());
        assert!(parse_format("ii").is_err());
    }

    #[test]
    fn write_integer_range() {
        let mut buffer = Buffer::new();
        assert!(matches!(
            FieldKind::Int8.write_integer(&mut buffer, 0xFFFF, ByteOrder::Little),
            Err(Error::OutOfRange { kind: "Int8", .. })
        ));
        assert!(matches!(
            FieldKind::UInt32.write_integer(&mut buffer, -1, ByteOrder::Little),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            FieldKind::UInt64.write_integer(&mut buffer, i128::from(u64::MAX) + 1, ByteOrder::Big),
            Err(Error::OutOfRange { .. })
        ));
        assert_eq!(buffer.size().unwrap(), 0);

        FieldKind::Int64
            .write_integer(&mut buffer, -1, ByteOrder::Little)
            .unwrap();
        assert_eq!(buffer.as_slice().unwrap(), &[0xFF; 8]);
    }

    #[test]
    fn write_category_mismatch() {
        let mut buffer = Buffer::new();
        assert!(matches!(
            FieldKind::Int32.write(&mut buffer, Value::Float(1.0), ByteOrder::Little),
            Err(Error::Format { .. })
        ));
        assert!(matches!(
            FieldKind::Float32.write(&mut buffer, Value::Int(1), ByteOrder::Little),
            Err(Error::Format { .. })
        ));
        assert!(matches!(
            FieldKind::Float32.write(&mut buffer, Value::Float(1e300), ByteOrder::Little),
            Err(Error::OutOfRange { .. })
        ));
        FieldKind::Float32
            .write(&mut buffer, Value::Float(f64::INFINITY), ByteOrder::Little)
            .unwrap();
        assert_eq!(buffer.size().unwrap(), 4);
    }

    #[test]
    fn every_kind_roundtrips() {
        let samples = [
            (FieldKind::Int8, Value::Int(-128)),
            (FieldKind::UInt8, Value::Int(255)),
            (FieldKind::Int16, Value::Int(-2)),
            (FieldKind::UInt16, Value::Int(0xBEEF)),
            (FieldKind::Int32, Value::Int(i128::from(i32::MIN))),
            (FieldKind::UInt32, Value::Int(0xDEAD_BEEF)),
            (FieldKind::Int64, Value::Int(i128::from(i64::MIN))),
            (FieldKind::UInt64, Value::Int(i128::from(u64::MAX))),
            (FieldKind::Float32, Value::Float(1.5)),
            (FieldKind::Float64, Value::Float(-0.125)),
            (FieldKind::Bool, Value::Bool(true)),
        ];

        for order in ByteOrder::iter() {
            let mut buffer = Buffer::new();
            for (kind, value) in samples {
                kind.write(&mut buffer, value, order).unwrap();
            }
            buffer.seek(SeekFrom::Start(0)).unwrap();
            for (kind, value) in samples {
                assert_eq!(kind.read(&mut buffer, order).unwrap(), value, "{kind} {order}");
            }
            assert_eq!(buffer.remaining().unwrap(), 0);
        }
    }

    #[test]
    fn bool_reads_any_nonzero() {
        let mut buffer = Buffer::from(vec![0x00, 0x02]);
        assert_eq!(
            FieldKind::Bool.read(&mut buffer, ByteOrder::Little).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            FieldKind::Bool.read(&mut buffer, ByteOrder::Little).unwrap(),
            Value::Bool(true)
        );
    }
}
