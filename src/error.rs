//! Centralized error types for tnefreader.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the tnefreader library.
///
/// Every variant is fatal for the reader that produced it: once an operation
/// fails, the reader refuses further work with [`TnefError::Poisoned`].
#[derive(Error, Debug)]
pub enum TnefError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("TNEF file not found: {0}")]
    FileNotFound(PathBuf),

    /// The stream does not start with the TNEF magic number.
    #[error("Invalid TNEF signature: 0x{found:08x}")]
    InvalidSignature { found: u32 },

    /// The stream ended before the requested bytes could be read.
    #[error("Truncated or invalid TNEF stream: needed {wanted} bytes at offset {offset}")]
    Truncated { offset: u64, wanted: u64 },

    /// The caller consumed bytes past the end of the current attribute.
    #[error("Attribute read incorrectly: expected next attribute at {expected}, position is {position}")]
    AttributeReadIncorrectly { expected: i64, position: u64 },

    /// The stored attribute checksum does not match the bytes read.
    #[error("Invalid checksum: stored {expected:#06x}, computed {computed:#06x}")]
    InvalidChecksum { expected: u16, computed: u16 },

    /// The attribute level byte is not a known level.
    #[error("Unknown attribute level: 0x{0:02x}")]
    UnknownLevel(u8),

    /// The attribute tag is not a known TNEF attribute.
    #[error("Unknown attribute tag: 0x{0:08x}")]
    UnknownTag(u32),

    /// The type nibble of a tag is not a known attribute type.
    #[error("Unknown attribute type: 0x{0:x}")]
    UnknownAttributeType(u32),

    /// The current attribute declares a length that cannot be read.
    #[error("Invalid attribute length: {length}")]
    InvalidLength { length: i32 },

    /// A date attribute holds an impossible calendar value.
    #[error("Invalid date: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")]
    InvalidDate {
        year: u16,
        month: u16,
        day: u16,
        hour: u16,
        minute: u16,
        second: u16,
    },

    /// A value read was requested before any attribute was fetched.
    #[error("No current attribute")]
    NoAttribute,

    /// A previous operation failed and the reader state is no longer valid.
    #[error("Reader is unusable after a previous error")]
    Poisoned,
}

/// Convenience alias for `Result<T, TnefError>`.
pub type Result<T> = std::result::Result<T, TnefError>;

impl TnefError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` when no path context is available
/// (in-memory sources and caller-supplied streams).
impl From<std::io::Error> for TnefError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
