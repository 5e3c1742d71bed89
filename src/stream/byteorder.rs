//! Byte order model shared by every fixed-width codec operation.
//!
//! A [`crate::stream::ByteOrder`] is stored as a plain tag on each stream. Changing it through
//! `set_byte_order` only affects operations issued afterwards; bytes that were already read
//! or written are never reinterpreted.
//!
//! Variable-length integers (LEB128) are independent of this setting.

use strum::{Display, EnumCount, EnumIter};

/// Byte order used to pack and unpack fixed-width values.
///
/// [`ByteOrder::Network`] has the exact wire behavior of [`ByteOrder::Big`].
/// [`ByteOrder::Native`] resolves to the byte order of the host at the point of use.
///
/// # Examples
///
/// ```rust
/// use datastream::ByteOrder;
///
/// assert!(ByteOrder::Network.is_big_endian());
/// assert!(!ByteOrder::Little.is_big_endian());
/// assert_eq!(ByteOrder::Native.is_big_endian(), cfg!(target_endian = "big"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumCount)]
pub enum ByteOrder {
    /// Least significant byte first
    #[default]
    Little,
    /// Most significant byte first
    Big,
    /// Network byte order, always big-endian
    Network,
    /// Byte order of the executing host
    Native,
}

impl ByteOrder {
    /// Resolve this tag to the concrete wire order, `true` meaning big-endian.
    #[must_use]
    pub const fn is_big_endian(self) -> bool {
        match self {
            ByteOrder::Little => false,
            ByteOrder::Big | ByteOrder::Network => true,
            ByteOrder::Native => cfg!(target_endian = "big"),
        }
    }

    /// The single-character prefix the C `struct` layout convention uses for this order.
    ///
    /// `<` little, `>` big, `!` network, `=` native with standard sizes.
    #[must_use]
    pub const fn token(self) -> char {
        match self {
            ByteOrder::Little => '<',
            ByteOrder::Big => '>',
            ByteOrder::Network => '!',
            ByteOrder::Native => '=',
        }
    }

    /// Parse a struct-layout prefix character back into a [`ByteOrder`].
    ///
    /// `@` is accepted as an alias for native order.
    #[must_use]
    pub const fn from_token(token: char) -> Option<Self> {
        match token {
            '<' => Some(ByteOrder::Little),
            '>' => Some(ByteOrder::Big),
            '!' => Some(ByteOrder::Network),
            '=' | '@' => Some(ByteOrder::Native),
            _ => None,
        }
    }
}
