use std::io::{Read, Seek, SeekFrom};

use crate::{
    stream::{traits::Stream, StreamConfig, WriteData},
    Buffer, ByteOrder, Error, Result,
};

/// Write-only stream producing a growing byte buffer, native byte order unless configured
/// otherwise.
///
/// Writing at the cursor overwrites existing bytes and extends the buffer when the write runs
/// past its end. Seeking beyond the end and writing zero-fills the gap.
///
/// # Examples
///
/// ```rust
/// use datastream::prelude::*;
///
/// let mut writer = StreamWriter::with_config(Vec::new(), StreamConfig::new(ByteOrder::Big));
/// writer.write_f64(1.0)?;
/// writer.write_sleb128(-123_456)?;
///
/// assert_eq!(
///     writer.bytes()?,
///     &[0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0xBB, 0x78]
/// );
/// # Ok::<(), datastream::Error>(())
/// ```
#[derive(Debug)]
pub struct StreamWriter {
    buffer: Buffer,
    config: StreamConfig,
}

impl StreamWriter {
    /// Create a native-order writer starting with the bytes of `data`, cursor at 0.
    pub fn new(data: impl Into<Buffer>) -> Self {
        Self::with_config(data, StreamConfig::new(ByteOrder::Native))
    }

    /// Create a writer over `data` with an explicit configuration.
    pub fn with_config(data: impl Into<Buffer>, config: StreamConfig) -> Self {
        StreamWriter {
            buffer: data.into(),
            config,
        }
    }

    /// Create a writer without storage. Every operation fails with
    /// [`crate::Error::Uninitialized`] until [`Stream::attach`] is called.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(Buffer::detached())
    }

    /// Create a native-order writer seeded with the full contents of a seekable source.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the source cannot be rewound or read.
    pub fn from_reader<R: Read + Seek>(source: &mut R) -> Result<Self> {
        Ok(Self::new(Buffer::from_reader(source)?))
    }

    /// Consume the writer and return the produced bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached writer.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.buffer.into_inner()
    }
}

impl Default for StreamWriter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Clone for StreamWriter {
    fn clone(&self) -> Self {
        let mut buffer = self.buffer.clone();
        buffer.rewind();
        StreamWriter {
            buffer,
            config: self.config,
        }
    }
}

impl TryFrom<StreamWriter> for Vec<u8> {
    type Error = Error;

    fn try_from(writer: StreamWriter) -> Result<Self> {
        writer.into_bytes()
    }
}

impl Stream for StreamWriter {
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
        StreamWriter { buffer, config }
    }
}

impl WriteData for StreamWriter {}
