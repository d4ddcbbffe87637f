//! TNEF stream header.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ signature: u32 = 0x223e9f78  │
//! │ attachment_key: i16          │
//! ├──────────────────────────────┤
//! │ ATTRIBUTES (repeated)        │
//! │  level: u8                   │
//! │  tag: u32                    │
//! │  length: i32                 │
//! │  value: [u8; length]         │
//! │  checksum: i16               │
//! └──────────────────────────────┘
//! ```
//! All integers are little-endian.

/// Magic number at the start of every TNEF stream.
pub const TNEF_SIGNATURE: u32 = 0x223e_9f78;

/// Size of the header in bytes.
pub const HEADER_SIZE: u64 = 6;

/// Stream header, read once when the reader is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Magic number (always [`TNEF_SIGNATURE`] once read).
    pub signature: u32,
    /// Key correlating attachment-level attributes.
    pub attachment_key: i16,
}
