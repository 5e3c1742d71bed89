//! # datastream Prelude
//!
//! Commonly used types and traits. Importing the prelude brings the facade traits into scope,
//! which is required to call any stream operation.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all datastream operations
pub use crate::Error;

/// The result type used throughout datastream
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Stream facades
pub use crate::{DuplexStream, StreamReader, StreamWriter};

/// Operation traits implemented by the facades
pub use crate::stream::{ReadData, Stream, WriteData};

// ================================================================================================
// Configuration and Values
// ================================================================================================

/// Byte order and limits
pub use crate::{ByteOrder, StreamConfig, VarintLimits};

/// Fixed-width field descriptors
pub use crate::{FieldKind, Value};

/// Low-level storage
pub use crate::Buffer;
