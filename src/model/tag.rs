//! TNEF attribute tags and value types.
//!
//! A tag is a 32-bit value: the low word is the attribute id and bits 16..20
//! carry the value type (`atpString`, `atpDate`, ...).

use crate::error::{Result, TnefError};

/// Mask selecting the value-type nibble of a tag.
pub const TYPE_MASK: u32 = 0x000F_0000;

/// Value type encoded in a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AttributeType {
    Triples,
    String,
    Text,
    Date,
    Short,
    Long,
    Byte,
    Word,
    Dword,
    Max,
}

impl AttributeType {
    /// Decode the type nibble of a raw tag value.
    pub fn from_tag(raw_tag: u32) -> Result<Self> {
        let nibble = (raw_tag & TYPE_MASK) >> 16;
        Ok(match nibble {
            0x0 => Self::Triples,
            0x1 => Self::String,
            0x2 => Self::Text,
            0x3 => Self::Date,
            0x4 => Self::Short,
            0x5 => Self::Long,
            0x6 => Self::Byte,
            0x7 => Self::Word,
            0x8 => Self::Dword,
            0x9 => Self::Max,
            other => return Err(TnefError::UnknownAttributeType(other)),
        })
    }

    /// `true` for types whose value is character data.
    pub fn is_textual(self) -> bool {
        matches!(self, Self::String | Self::Text)
    }
}

/// Known TNEF attribute tags, keyed by their full 32-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u32)]
pub enum Tag {
    Null = 0x0000_0000,
    Owner = 0x0006_0000,
    SentFor = 0x0006_0001,
    Delegate = 0x0006_0002,
    DateStart = 0x0003_0006,
    DateEnd = 0x0003_0007,
    AidOwner = 0x0005_0008,
    RequestRes = 0x0004_0009,
    OriginalMessageClass = 0x0007_0600,
    From = 0x0000_8000,
    Subject = 0x0001_8004,
    DateSent = 0x0003_8005,
    DateRecd = 0x0003_8006,
    MessageStatus = 0x0006_8007,
    MessageClass = 0x0007_8008,
    MessageId = 0x0001_8009,
    ParentId = 0x0001_800A,
    ConversationId = 0x0001_800B,
    Body = 0x0002_800C,
    Priority = 0x0004_800D,
    AttachData = 0x0006_800F,
    AttachTitle = 0x0001_8010,
    AttachMetaFile = 0x0006_8011,
    AttachCreateDate = 0x0003_8012,
    AttachModifyDate = 0x0003_8013,
    DateModified = 0x0003_8020,
    AttachTransportFilename = 0x0006_9001,
    AttachRenddata = 0x0006_9002,
    MapiProps = 0x0006_9003,
    RecipTable = 0x0006_9004,
    Attachment = 0x0006_9005,
    TnefVersion = 0x0008_9006,
    OemCodepage = 0x0006_9007,
}

impl Tag {
    /// Map a raw 32-bit tag to a known attribute.
    pub fn from_u32(raw: u32) -> Result<Self> {
        Ok(match raw {
            0x0000_0000 => Self::Null,
            0x0006_0000 => Self::Owner,
            0x0006_0001 => Self::SentFor,
            0x0006_0002 => Self::Delegate,
            0x0003_0006 => Self::DateStart,
            0x0003_0007 => Self::DateEnd,
            0x0005_0008 => Self::AidOwner,
            0x0004_0009 => Self::RequestRes,
            0x0007_0600 => Self::OriginalMessageClass,
            0x0000_8000 => Self::From,
            0x0001_8004 => Self::Subject,
            0x0003_8005 => Self::DateSent,
            0x0003_8006 => Self::DateRecd,
            0x0006_8007 => Self::MessageStatus,
            0x0007_8008 => Self::MessageClass,
            0x0001_8009 => Self::MessageId,
            0x0001_800A => Self::ParentId,
            0x0001_800B => Self::ConversationId,
            0x0002_800C => Self::Body,
            0x0004_800D => Self::Priority,
            0x0006_800F => Self::AttachData,
            0x0001_8010 => Self::AttachTitle,
            0x0006_8011 => Self::AttachMetaFile,
            0x0003_8012 => Self::AttachCreateDate,
            0x0003_8013 => Self::AttachModifyDate,
            0x0003_8020 => Self::DateModified,
            0x0006_9001 => Self::AttachTransportFilename,
            0x0006_9002 => Self::AttachRenddata,
            0x0006_9003 => Self::MapiProps,
            0x0006_9004 => Self::RecipTable,
            0x0006_9005 => Self::Attachment,
            0x0008_9006 => Self::TnefVersion,
            0x0006_9007 => Self::OemCodepage,
            other => return Err(TnefError::UnknownTag(other)),
        })
    }

    /// The raw 32-bit tag value.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Value type carried in the tag's type nibble.
    pub fn attribute_type(self) -> AttributeType {
        match self {
            Self::Null | Self::From => AttributeType::Triples,
            Self::Subject
            | Self::MessageId
            | Self::ParentId
            | Self::ConversationId
            | Self::AttachTitle => AttributeType::String,
            Self::Body => AttributeType::Text,
            Self::DateStart
            | Self::DateEnd
            | Self::DateSent
            | Self::DateRecd
            | Self::AttachCreateDate
            | Self::AttachModifyDate
            | Self::DateModified => AttributeType::Date,
            Self::RequestRes | Self::Priority => AttributeType::Short,
            Self::AidOwner => AttributeType::Long,
            Self::Owner
            | Self::SentFor
            | Self::Delegate
            | Self::MessageStatus
            | Self::AttachData
            | Self::AttachMetaFile
            | Self::AttachTransportFilename
            | Self::AttachRenddata
            | Self::MapiProps
            | Self::RecipTable
            | Self::Attachment
            | Self::OemCodepage => AttributeType::Byte,
            Self::OriginalMessageClass | Self::MessageClass => AttributeType::Word,
            Self::TnefVersion => AttributeType::Dword,
        }
    }
}
