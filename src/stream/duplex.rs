use std::io::{Read, Seek, SeekFrom};

use crate::{
    stream::{traits::Stream, ReadData, StreamConfig, WriteData},
    Buffer, ByteOrder, Result,
};

/// Combined reader and writer over one buffer and one cursor.
///
/// Reads and writes interleave against the same position: a write advances the cursor past the
/// written bytes, so reading back what was just written requires a seek first.
///
/// # Examples
///
/// ```rust
/// use datastream::prelude::*;
/// use std::io::SeekFrom;
///
/// let mut stream = DuplexStream::new(Vec::new());
/// stream.write_uleb128(300)?;
/// stream.write_bool(true)?;
///
/// stream.seek(SeekFrom::Start(0))?;
/// assert_eq!(stream.read_uleb128()?, 300);
/// assert!(stream.read_bool()?);
/// # Ok::<(), datastream::Error>(())
/// ```
#[derive(Debug)]
pub struct DuplexStream {
    buffer: Buffer,
    config: StreamConfig,
}

impl DuplexStream {
    /// Create a native-order duplex stream over `data`.
    pub fn new(data: impl Into<Buffer>) -> Self {
        Self::with_config(data, StreamConfig::new(ByteOrder::Native))
    }

    /// Create a duplex stream with an explicit configuration.
    pub fn with_config(data: impl Into<Buffer>, config: StreamConfig) -> Self {
        DuplexStream {
            buffer: data.into(),
            config,
        }
    }

    /// Create a duplex stream holding the full contents of a seekable source.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the source cannot be rewound or read.
    pub fn from_reader<R: Read + Seek>(source: &mut R) -> Result<Self> {
        Ok(Self::new(Buffer::from_reader(source)?))
    }

    /// Consume the stream and return its storage.
    ///
    /// # Errors
    /// Returns [`crate::Error::Uninitialized`] on a detached buffer.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.buffer.into_inner()
    }
}

impl Default for DuplexStream {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Clone for DuplexStream {
    fn clone(&self) -> Self {
        let mut buffer = self.buffer.clone();
        buffer.rewind();
        DuplexStream {
            buffer,
            config: self.config,
        }
    }
}

impl Stream for DuplexStream {
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
        DuplexStream { buffer, config }
    }
}

impl ReadData for DuplexStream {}

impl WriteData for DuplexStream {}
