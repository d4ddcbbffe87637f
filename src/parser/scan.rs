//! Whole-stream attribute scan.
//!
//! Walks a TNEF stream to the end, reading every value and collecting a
//! serializable summary of the attributes found. String and date values are
//! decoded; everything else is reported by type and length only.

use std::io::{Read, Seek};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use super::reader::TnefReader;
use crate::config::{load_config, ReaderConfig};
use crate::error::Result;
use crate::model::attribute::Level;
use crate::model::tag::{AttributeType, Tag};

/// One attribute as seen by [`scan`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSummary {
    pub level: Level,
    pub tag: Tag,
    pub attribute_type: AttributeType,
    pub length: i32,
    pub value_offset: u64,
    /// `true` if the trailing checksum was checked and matched.
    pub checksum_verified: bool,
    /// Decoded value of string and text attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Decoded value of date attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
}

/// Result of scanning a complete stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TnefSummary {
    pub attachment_key: i16,
    pub tnef_version: i32,
    pub oem_code_page: i32,
    /// Charset resolved from the OEM code page (empty if unknown).
    pub charset: String,
    /// Number of attachments, counted by their `attAttachRenddata` attribute.
    pub attachment_count: usize,
    pub attributes: Vec<AttributeSummary>,
}

impl TnefSummary {
    /// Pretty-printed JSON form of the summary.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// First message-level string value for `tag`, if present.
    pub fn message_text(&self, tag: Tag) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.level == Level::Message && a.tag == tag)
            .and_then(|a| a.text.as_deref())
    }
}

/// Open `path` and scan it.
pub fn scan_file(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<TnefSummary> {
    let mut reader = TnefReader::open(path, config)?;
    scan(&mut reader, config)
}

/// Open `path` and scan it with the reader settings from the user's config
/// file, or the defaults when there is none.
pub fn scan_file_with_user_config(path: impl AsRef<Path>) -> Result<TnefSummary> {
    let config = load_config().reader;
    scan_file(path, &config)
}

/// Read every attribute of `reader` until the end of the stream.
pub fn scan<R: Read + Seek>(
    reader: &mut TnefReader<R>,
    config: &ReaderConfig,
) -> Result<TnefSummary> {
    let mut attributes = Vec::new();
    let mut attachment_count = 0;

    while reader.advance()? {
        let Some(attr) = reader.attribute().copied() else {
            break;
        };
        let attribute_type = attr.attribute_type();
        let mut text = None;
        let mut date = None;

        // Bootstrap attributes arrive with part of their value already read.
        let untouched = reader.position() == attr.value_offset;
        if untouched && attribute_type.is_textual() {
            text = Some(reader.read_string()?);
        } else if untouched && attribute_type == AttributeType::Date && attr.length == 14 {
            date = Some(reader.read_date()?);
        } else {
            reader.read_value()?;
        }

        let checksum_verified = if config.verify_checksums {
            reader.validate_checksum()?;
            true
        } else {
            false
        };

        if attr.level == Level::Attachment && attr.tag == Tag::AttachRenddata {
            attachment_count += 1;
        }

        attributes.push(AttributeSummary {
            level: attr.level,
            tag: attr.tag,
            attribute_type,
            length: attr.length,
            value_offset: attr.value_offset,
            checksum_verified,
            text,
            date,
        });
    }

    debug!(
        attributes = attributes.len(),
        attachments = attachment_count,
        "Scanned TNEF stream"
    );

    Ok(TnefSummary {
        attachment_key: reader.attachment_key(),
        tnef_version: reader.tnef_version(),
        oem_code_page: reader.oem_code_page(),
        charset: reader.charset().to_string(),
        attachment_count,
        attributes,
    })
}
