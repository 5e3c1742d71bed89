// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # datastream
//!
//! Cursor-based reading and writing of binary data held in memory.
//!
//! `datastream` decodes and encodes fixed-width integers and IEEE-754 floats in a selectable
//! byte order, plus the LEB128 variable-length integer family (ULEB128, ULEB128p1 and SLEB128)
//! with optional byte caps for untrusted input. All operations work against a seekable,
//! growable in-memory buffer that tracks a single cursor.
//!
//! ## Features
//!
//! - **Selectable byte order** - little, big, network and native, changeable mid-stream
//! - **Complete fixed-width coverage** - 8/16/32/64-bit signed and unsigned, `f32`, `f64`, bool
//! - **LEB128 varints** - unbounded, explicitly bounded and configuration-bounded variants
//! - **No partial reads** - a failed decode never moves the cursor
//! - **Search** - forward and backward pattern search that leaves the cursor alone
//!
//! ## Quick Start
//!
//! ```rust
//! use datastream::prelude::*;
//! use std::io::SeekFrom;
//!
//! let mut stream = DuplexStream::with_config(Vec::new(), StreamConfig::new(ByteOrder::Big));
//! stream.write_u32(0xDEAD_BEEF)?;
//! stream.write_sleb128(-123_456)?;
//! stream.write(b"\0tail")?;
//!
//! stream.seek(SeekFrom::Start(0))?;
//! assert_eq!(stream.read_u32()?, 0xDEAD_BEEF);
//! assert_eq!(stream.read_sleb128_safe()?, -123_456);
//! assert_eq!(stream.search(b"tail")?, Some(8));
//! # Ok::<(), datastream::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`Buffer`] - storage plus cursor, the only stateful component
//! - [`stream::io`] and [`FieldKind`] - stateless fixed-width codec
//! - [`stream::leb128`] - stateless LEB128 codec
//! - [`StreamReader`], [`StreamWriter`], [`DuplexStream`] - facades binding a buffer to a
//!   [`StreamConfig`]
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`Result`]. See [`Error`] for the individual failure
//! categories. Diagnostics are emitted as `tracing` events at trace level; the crate never
//! installs a subscriber itself.
#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use datastream::prelude::*;
///
/// let mut reader = StreamReader::new(vec![0x2A]);
/// assert_eq!(reader.read_u8()?, 42);
/// # Ok::<(), datastream::Error>(())
/// ```
pub mod prelude;

/// Buffers, codecs and stream facades.
///
/// See [`stream::Buffer`] for the storage layer, [`stream::io`] and [`stream::leb128`] for the
/// codecs and [`stream::StreamReader`], [`stream::StreamWriter`] and [`stream::DuplexStream`]
/// for the high-level entry points.
pub mod stream;

/// `datastream` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `datastream` Error type
///
/// # Examples
///
/// ```rust
/// use datastream::{prelude::*, Error};
///
/// let mut writer = StreamWriter::default();
/// match writer.write_format("b", 300) {
///     Err(Error::OutOfRange { kind, value }) => println!("{value} does not fit {kind}"),
///     Err(e) => println!("Error: {e}"),
///     Ok(()) => unreachable!(),
/// }
/// ```
pub use error::Error;

/// Seekable byte storage with cursor tracking.
pub use stream::Buffer;

/// Byte order selection for fixed-width values.
pub use stream::ByteOrder;

/// Fixed-width field kinds and decoded values.
pub use stream::{FieldKind, Value};

/// Stream configuration.
pub use stream::{StreamConfig, VarintLimits};

/// Stream facades.
pub use stream::{DuplexStream, StreamReader, StreamWriter};
