//! The attribute currently under the reader's cursor.

use super::tag::{AttributeType, Tag};
use crate::error::{Result, TnefError};

/// Size of the checksum word that follows each attribute value.
pub const CHECKSUM_SIZE: i64 = 2;

/// Whether an attribute belongs to the message or to an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Level {
    Message,
    Attachment,
}

impl Level {
    /// Map the raw level byte.
    pub fn from_u8(raw: u8) -> Result<Self> {
        match raw {
            0x01 => Ok(Self::Message),
            0x02 => Ok(Self::Attachment),
            other => Err(TnefError::UnknownLevel(other)),
        }
    }

    /// The raw level byte.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Message => 0x01,
            Self::Attachment => 0x02,
        }
    }
}

/// Framing of one attribute.
///
/// Produced by [`TnefReader::advance`](crate::parser::reader::TnefReader::advance)
/// and replaced on the next advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub level: Level,
    pub tag: Tag,
    /// Declared value length. Signed on the wire; negative values are kept
    /// so that the cursor can reject them.
    pub length: i32,
    /// Absolute stream offset of the first value byte.
    pub value_offset: u64,
}

impl Attribute {
    /// Offset just past the last value byte.
    pub fn value_end(&self) -> i64 {
        self.value_offset as i64 + i64::from(self.length)
    }

    /// Offset of the next attribute (after the 2-byte checksum).
    pub fn next_offset(&self) -> i64 {
        self.value_end() + CHECKSUM_SIZE
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.tag.attribute_type()
    }
}

/// Values captured from message-level bootstrap attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Value of `attTnefVersion` (0 until seen).
    pub tnef_version: i32,
    /// Primary code page from `attOemCodepage` (0 until seen).
    pub oem_code_page: i32,
}
