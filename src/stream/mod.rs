//! Cursor-based binary streams over in-memory buffers.
//!
//! This module contains everything needed to decode and encode binary data: a seekable
//! [`crate::stream::Buffer`], the stateless fixed-width and LEB128 codecs that operate on it,
//! and three facades that bundle a buffer with a byte order and varint limits.
//!
//! # Architecture
//!
//! The layering is strictly bottom-up. Nothing above the buffer holds storage or cursor state
//! of its own:
//!
//! - **Storage** - [`crate::stream::Buffer`] owns the bytes and the cursor
//! - **Codecs** - [`crate::stream::io`], [`crate::stream::FieldKind`] and
//!   [`crate::stream::leb128`] translate between values and bytes
//! - **Views** - [`crate::stream::Stream`], [`crate::stream::ReadData`] and
//!   [`crate::stream::WriteData`] expose the codecs as provided trait methods
//! - **Facades** - [`crate::stream::StreamReader`], [`crate::stream::StreamWriter`] and
//!   [`crate::stream::DuplexStream`] pick which views are available
//!
//! # Examples
//!
//! ```rust
//! use datastream::prelude::*;
//!
//! let mut writer = StreamWriter::with_config(Vec::new(), StreamConfig::new(ByteOrder::Little));
//! writer.write_u16(0xCAFE)?;
//! writer.write_uleb128(624_485)?;
//! writer.write_format(">i", -2)?;
//!
//! let mut reader = StreamReader::new(writer.into_bytes()?);
//! assert_eq!(reader.read_u16()?, 0xCAFE);
//! assert_eq!(reader.read_uleb128()?, 624_485);
//! assert_eq!(reader.read_format(">i")?, Value::Int(-2));
//! # Ok::<(), datastream::Error>(())
//! ```

pub mod io;
pub mod leb128;

mod buffer;
mod byteorder;
mod config;
mod duplex;
mod field;
mod reader;
mod traits;
mod writer;

pub use buffer::Buffer;
pub use byteorder::ByteOrder;
pub use config::{StreamConfig, VarintLimits};
pub use duplex::DuplexStream;
pub use field::{parse_format, FieldKind, Value};
pub use reader::StreamReader;
pub use traits::{ReadData, Stream, WriteData};
pub use writer::StreamWriter;
