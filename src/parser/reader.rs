//! Sequential TNEF attribute reader.
//!
//! [`TnefReader`] walks a stream one attribute at a time. The caller drives it
//! with [`TnefReader::advance`] and consumes each value through the primitive
//! reads (`read_i32`, `read_bytes`, `read_string`, ...). The reader keeps the
//! attribute boundaries honest:
//!
//! - a value that was only partly read is skipped on the next advance;
//! - a value that was read past its declared length is a fatal error;
//! - [`TnefReader::validate_checksum`] compares the running checksum of the
//!   value bytes with the stored trailing word.
//!
//! Two message-level attributes, `attTnefVersion` and `attOemCodepage`, are
//! decoded by the reader itself as they are met. The code page selects the
//! charset used by [`TnefReader::read_string`].

use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use super::checksum::Checksum;
use super::codepage::{charset_for_code_page, decode_text};
use crate::config::ReaderConfig;
use crate::error::{Result, TnefError};
use crate::model::attribute::{Attribute, DocumentInfo, Level};
use crate::model::header::{Header, HEADER_SIZE, TNEF_SIGNATURE};
use crate::model::tag::Tag;

/// Streaming reader over a TNEF byte source.
///
/// The source is read and seeked, never written. Offsets reported by the
/// reader are absolute positions in the source.
pub struct TnefReader<R> {
    source: R,
    stream_length: u64,
    position: u64,
    header: Header,
    attribute: Option<Attribute>,
    checksum: Checksum,
    document: DocumentInfo,
    version_seen: bool,
    code_page_seen: bool,
    chunk_size: usize,
    finished: bool,
    poisoned: bool,
}

impl TnefReader<BufReader<File>> {
    /// Open a TNEF file and read its header.
    pub fn open(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TnefError::FileNotFound(path.to_path_buf())
            } else {
                TnefError::io(path, e)
            }
        })?;
        Self::with_config(BufReader::new(file), config)
    }
}

impl<R: Read + Seek> TnefReader<R> {
    /// Create a reader with the default configuration.
    pub fn new(source: R) -> Result<Self> {
        Self::with_config(source, &ReaderConfig::default())
    }

    /// Create a reader and read the stream header.
    ///
    /// The stream starts at the source's current position. Fails with
    /// [`TnefError::InvalidSignature`] if the magic number does not match.
    pub fn with_config(mut source: R, config: &ReaderConfig) -> Result<Self> {
        let start = source.stream_position()?;
        let stream_length = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(start))?;

        let header = read_header(&mut source, start)?;
        debug!(
            attachment_key = header.attachment_key,
            stream_length, "Read TNEF header"
        );

        Ok(Self {
            source,
            stream_length,
            position: start + HEADER_SIZE,
            header,
            attribute: None,
            checksum: Checksum::new(),
            document: DocumentInfo::default(),
            version_seen: false,
            code_page_seen: false,
            chunk_size: config.effective_chunk_size(),
            finished: false,
            poisoned: false,
        })
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn attachment_key(&self) -> i16 {
        self.header.attachment_key
    }

    /// Current absolute offset in the source.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total length of the source in bytes.
    pub fn stream_length(&self) -> u64 {
        self.stream_length
    }

    /// The attribute under the cursor, if any.
    pub fn attribute(&self) -> Option<&Attribute> {
        self.attribute.as_ref()
    }

    pub fn document(&self) -> &DocumentInfo {
        &self.document
    }

    pub fn tnef_version(&self) -> i32 {
        self.document.tnef_version
    }

    pub fn oem_code_page(&self) -> i32 {
        self.document.oem_code_page
    }

    /// Charset name for string values, `""` when the code page is unknown.
    pub fn charset(&self) -> &'static str {
        charset_for_code_page(self.document.oem_code_page)
    }

    /// Value bytes of the current attribute not yet consumed.
    ///
    /// Negative when the caller has read past the value.
    pub fn remaining_in_value(&self) -> Option<i64> {
        self.attribute
            .map(|attr| attr.value_end() - self.position as i64)
    }

    /// Running checksum of the current attribute value.
    pub fn checksum(&self) -> u16 {
        self.checksum.value()
    }

    /// `true` once an operation has failed.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Give back the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    // ── Attribute cursor ────────────────────────────────────────

    /// Move to the next attribute.
    ///
    /// Returns `Ok(false)` at the end of the stream. Any value bytes the
    /// caller left unread are skipped; a value read past its end is an error.
    pub fn advance(&mut self) -> Result<bool> {
        self.guarded(Self::advance_inner)
    }

    fn advance_inner(&mut self) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }
        if let Some(attr) = self.attribute {
            self.seek_to_next(&attr)?;
        }
        if self.position >= self.stream_length {
            self.finished = true;
            self.attribute = None;
            debug!(position = self.position, "End of TNEF stream");
            return Ok(false);
        }

        let level = Level::from_u8(self.take_u8()?)?;
        let tag = Tag::from_u32(self.take_u32()?)?;
        let length = self.take_i32()?;
        let attr = Attribute {
            level,
            tag,
            length,
            value_offset: self.position,
        };
        self.attribute = Some(attr);
        self.checksum.reset();
        debug!(
            ?level,
            ?tag,
            length,
            offset = attr.value_offset,
            "Read attribute"
        );

        self.bootstrap(&attr)?;
        Ok(true)
    }

    /// Position the source at the start of the attribute after `attr`.
    fn seek_to_next(&mut self, attr: &Attribute) -> Result<()> {
        if attr.length < 0 {
            return Err(TnefError::InvalidLength {
                length: attr.length,
            });
        }
        let expected = attr.next_offset();
        match expected.cmp(&(self.position as i64)) {
            Ordering::Greater => {
                let target = expected as u64;
                if target > self.stream_length {
                    return Err(TnefError::Truncated {
                        offset: self.position,
                        wanted: target - self.position,
                    });
                }
                trace!(
                    from = self.position,
                    to = target,
                    "Skipping unread value bytes"
                );
                self.source.seek_relative((target - self.position) as i64)?;
                self.position = target;
                Ok(())
            }
            Ordering::Less => Err(TnefError::AttributeReadIncorrectly {
                expected,
                position: self.position,
            }),
            Ordering::Equal => Ok(()),
        }
    }

    /// Check the stored checksum of the current attribute.
    ///
    /// Only acts when exactly the declared value bytes have been consumed;
    /// otherwise this is a no-op and the next [`advance`](Self::advance)
    /// settles the boundary.
    pub fn validate_checksum(&mut self) -> Result<()> {
        self.guarded(|r| {
            let Some(attr) = r.attribute else {
                return Ok(());
            };
            if r.position as i64 != attr.value_end() {
                return Ok(());
            }
            let computed = r.checksum;
            let stored = r.take_i16()?;
            if !computed.matches(stored) {
                return Err(TnefError::InvalidChecksum {
                    expected: stored as u16,
                    computed: computed.value(),
                });
            }
            Ok(())
        })
    }

    // ── Bootstrap attributes ────────────────────────────────────

    /// Decode `attTnefVersion` and `attOemCodepage` at message level.
    ///
    /// Each is captured once; later occurrences are left to the caller.
    fn bootstrap(&mut self, attr: &Attribute) -> Result<()> {
        if attr.level != Level::Message || attr.length < 4 {
            return Ok(());
        }
        match attr.tag {
            Tag::TnefVersion if !self.version_seen => {
                self.document.tnef_version = self.take_i32()?;
                self.version_seen = true;
                debug!(version = self.document.tnef_version, "TNEF version");
            }
            Tag::OemCodepage if !self.code_page_seen => {
                self.document.oem_code_page = self.take_i32()?;
                self.code_page_seen = true;
                debug!(
                    code_page = self.document.oem_code_page,
                    charset = self.charset(),
                    "OEM code page"
                );
            }
            _ => {}
        }
        Ok(())
    }

    // ── Primitive reads ─────────────────────────────────────────

    pub fn read_u8(&mut self) -> Result<u8> {
        self.guarded(Self::take_u8)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.guarded(Self::take_i16)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.guarded(Self::take_u16)
    }

    /// Read a little-endian `i32`; values above `0x7FFFFFFF` are negative.
    pub fn read_i32(&mut self) -> Result<i32> {
        self.guarded(Self::take_i32)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.guarded(Self::take_u32)
    }

    /// Read exactly `length` bytes.
    pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        self.guarded(|r| r.take_bytes(length))
    }

    /// Read the rest of the current attribute's value.
    pub fn read_value(&mut self) -> Result<Vec<u8>> {
        self.guarded(|r| {
            let attr = r.attribute.ok_or(TnefError::NoAttribute)?;
            if attr.length < 0 {
                return Err(TnefError::InvalidLength {
                    length: attr.length,
                });
            }
            let remaining = attr.value_end() - r.position as i64;
            if remaining < 0 {
                return Err(TnefError::AttributeReadIncorrectly {
                    expected: attr.value_end(),
                    position: r.position,
                });
            }
            r.take_bytes(remaining as usize)
        })
    }

    /// Stream `length` bytes into `sink`, in chunks of the configured size.
    ///
    /// Returns the number of bytes copied.
    pub fn copy_bytes<W: Write>(&mut self, length: u64, sink: &mut W) -> Result<u64> {
        self.guarded(|r| {
            r.ensure_available(length)?;
            let mut buf = vec![0u8; r.chunk_size.min(length as usize)];
            let mut left = length;
            while left > 0 {
                let n = buf.len().min(left as usize);
                r.fill(&mut buf[..n])?;
                sink.write_all(&buf[..n])?;
                left -= n as u64;
            }
            Ok(length)
        })
    }

    /// Read the current attribute's value as text.
    ///
    /// One trailing NUL is dropped. The bytes are decoded with the charset of
    /// the OEM code page.
    pub fn read_string(&mut self) -> Result<String> {
        self.guarded(|r| {
            let attr = r.attribute.ok_or(TnefError::NoAttribute)?;
            if attr.length < 0 {
                return Err(TnefError::InvalidLength {
                    length: attr.length,
                });
            }
            let mut bytes = r.take_bytes(attr.length as usize)?;
            if bytes.last() == Some(&0) {
                bytes.pop();
            }
            Ok(decode_text(&bytes, r.charset()))
        })
    }

    /// Read an `atpDate` value: year, month, day, hour, minute, second and
    /// day-of-week as little-endian `u16` words. The day of week is ignored.
    pub fn read_date(&mut self) -> Result<NaiveDateTime> {
        self.guarded(|r| {
            let mut words = [0u16; 7];
            for word in words.iter_mut() {
                *word = r.take_u16()?;
            }
            let [year, month, day, hour, minute, second, _] = words;
            NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
                .and_then(|d| {
                    d.and_hms_opt(u32::from(hour), u32::from(minute), u32::from(second))
                })
                .ok_or(TnefError::InvalidDate {
                    year,
                    month,
                    day,
                    hour,
                    minute,
                    second,
                })
        })
    }

    // ── Internals ───────────────────────────────────────────────

    /// Run `op`, poisoning the reader if it fails.
    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.poisoned {
            return Err(TnefError::Poisoned);
        }
        let result = op(self);
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    fn ensure_available(&self, wanted: u64) -> Result<()> {
        match self.position.checked_add(wanted) {
            Some(end) if end <= self.stream_length => Ok(()),
            _ => Err(TnefError::Truncated {
                offset: self.position,
                wanted,
            }),
        }
    }

    /// Read exactly `buf.len()` bytes and fold them into the checksum.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let wanted = buf.len() as u64;
        self.ensure_available(wanted)?;
        self.source.read_exact(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                TnefError::Truncated {
                    offset: self.position,
                    wanted,
                }
            } else {
                TnefError::from(e)
            }
        })?;
        self.position += wanted;
        self.checksum.fold(buf);
        Ok(())
    }

    fn take_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    fn take_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_u16(&buf))
    }

    fn take_i16(&mut self) -> Result<i16> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_i16(&buf))
    }

    fn take_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_u32(&buf))
    }

    fn take_i32(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_i32(&buf))
    }

    fn take_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        self.ensure_available(length as u64)?;
        let mut buf = vec![0u8; length];
        self.fill(&mut buf)?;
        Ok(buf)
    }
}

/// Read and check the signature, then the attachment key.
fn read_header<R: Read>(source: &mut R, start: u64) -> Result<Header> {
    let truncated = |e: std::io::Error, offset: u64, wanted: u64| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            TnefError::Truncated { offset, wanted }
        } else {
            TnefError::from(e)
        }
    };
    let signature = source
        .read_u32::<LittleEndian>()
        .map_err(|e| truncated(e, start, 4))?;
    if signature != TNEF_SIGNATURE {
        return Err(TnefError::InvalidSignature { found: signature });
    }
    let attachment_key = source
        .read_i16::<LittleEndian>()
        .map_err(|e| truncated(e, start + 4, 2))?;
    Ok(Header {
        signature,
        attachment_key,
    })
}
