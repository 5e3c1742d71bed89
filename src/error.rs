use thiserror::Error;

macro_rules! format_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Format {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Format {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! underflow_error {
    ($needed:expr, $available:expr) => {
        crate::Error::Underflow {
            needed: $needed,
            available: $available,
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every error is surfaced synchronously to the immediate caller. Nothing is retried or
/// swallowed internally, and a failed operation never leaves the cursor half-way through a
/// value.
///
/// # Error Categories
///
/// ## Buffer state
/// - [`Error::Uninitialized`] - No backing storage has been attached yet
/// - [`Error::InvalidOffset`] - A seek would move the cursor before the start of the buffer
///
/// ## Decoding
/// - [`Error::Underflow`] - Fewer bytes remain than the requested value needs
/// - [`Error::DelimiterNotFound`] - `read_until` ran out of input without a match
///
/// ## Encoding
/// - [`Error::OutOfRange`] - The value does not fit the requested width
/// - [`Error::Format`] - Invalid format descriptor or a value of the wrong category
///
/// # Examples
///
/// ```rust
/// use datastream::{prelude::*, Error};
///
/// let mut reader = StreamReader::new(&[0x01, 0x02][..]);
/// match reader.read_u32() {
///     Err(Error::Underflow { needed, available }) => {
///         assert_eq!((needed, available), (4, 2));
///     }
///     other => panic!("unexpected result: {other:?}"),
/// }
/// assert_eq!(reader.tell()?, 0);
/// # Ok::<(), datastream::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An operation was attempted before a backing buffer was attached.
    #[error("Backing buffer has not been attached")]
    Uninitialized,

    /// A seek would have placed the cursor before offset zero.
    #[error("Could not seek to a valid offset!")]
    InvalidOffset,

    /// A fixed-width (or unterminated variable-width) decode needed more bytes than remain.
    ///
    /// The cursor is left at the position it had before the failing call.
    ///
    /// # Fields
    ///
    /// * `needed` - Bytes required to complete the value
    /// * `available` - Bytes that were left in the buffer
    #[error("Underflow - needed {needed} bytes, only {available} available")]
    Underflow {
        /// Bytes required to complete the value
        needed: usize,
        /// Bytes that were left in the buffer
        available: usize,
    },

    /// The value is not representable by the target type.
    ///
    /// Encoding never wraps silently. Passing `300` for an `Int8` field, or a finite `f64`
    /// larger than `f32::MAX` for a `Float32` field, ends up here.
    #[error("Value {value} is out of range for {kind}")]
    OutOfRange {
        /// Name of the target type
        kind: &'static str,
        /// Textual rendering of the rejected value
        value: String,
    },

    /// An invalid format descriptor was passed to the generic entry points.
    ///
    /// # Fields
    ///
    /// * `message` - Description of what was wrong with the descriptor
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Format - {file}:{line}: {message}")]
    Format {
        /// The message to be printed for the Format error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// `read_until` consumed the remaining input without finding the delimiter.
    #[error("Delimiter not found before end of buffer")]
    DelimiterNotFound,

    /// I/O error while snapshotting a caller supplied container.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
