use std::io::{Read, Seek};

use crate::{
    stream::{traits::Stream, ReadData, StreamConfig},
    Buffer, ByteOrder, Result,
};

/// Read-only stream over a [`Buffer`], little-endian unless configured otherwise.
///
/// Only the [`Stream`] and [`ReadData`] operations are available, so a reader can never mutate
/// the bytes it was created from.
///
/// # Examples
///
/// ```rust
/// use datastream::prelude::*;
///
/// let mut reader = StreamReader::new(vec![0xE5, 0x8E, 0x26, 0x34, 0x12]);
/// assert_eq!(reader.read_uleb128()?, 624_485);
/// assert_eq!(reader.read_u16()?, 0x1234);
/// assert_eq!(reader.remaining()?, 0);
/// # Ok::<(), datastream::Error>(())
/// ```
#[derive(Debug)]
pub struct StreamReader {
    buffer: Buffer,
    config: StreamConfig,
}

impl StreamReader {
    /// Create a little-endian reader over `data`.
    pub fn new(data: impl Into<Buffer>) -> Self {
        Self::with_config(data, StreamConfig::new(ByteOrder::Little))
    }

    /// Create a reader over `data` with an explicit configuration.
    pub fn with_config(data: impl Into<Buffer>, config: StreamConfig) -> Self {
        StreamReader {
            buffer: data.into(),
            config,
        }
    }

    /// Create a little-endian reader holding the full contents of a seekable source.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the source cannot be rewound or read.
    pub fn from_reader<R: Read + Seek>(source: &mut R) -> Result<Self> {
        Ok(Self::new(Buffer::from_reader(source)?))
    }

    /// Consume the reader and return its storage.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.buffer.into_inner()
    }
}

impl Clone for StreamReader {
    /// Deep copy of the storage and configuration. The clone starts at offset 0.
    fn clone(&self) -> Self {
        let mut buffer = self.buffer.clone();
        buffer.rewind();
        StreamReader {
            buffer,
            config: self.config,
        }
    }
}

impl Stream for StreamReader {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    fn config(&self) -> &StreamConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut StreamConfig {
        &mut self.config
    }

    fn from_parts(buffer: Buffer, config: StreamConfig) -> Self {
        StreamReader { buffer, config }
    }
}

impl ReadData for StreamReader {}
