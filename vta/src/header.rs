//! Document header
//!
//! The header is a fixed 196 byte region in front of the first element. Both
//! element counts live in here, at offsets that are nowhere near the arrays
//! they describe:
//!
//! | Offset | Type     | Name           | Description |
//! | -----: | -------- | -------------- | ----------- |
//! | 0      | [u8; 12] | -              | Opaque |
//! | 12     | i32      | template_count | Number of template elements |
//! | 16     | [u8; 136]| -              | Opaque |
//! | 152    | i32      | visual_count   | Number of visual elements |
//! | 156    | [u8; 40] | type_info      | Validation block for external readers |
//!
//! Only the two counts are interpreted. The rest is carried verbatim.
use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use vcore::buf::{ByteCursor, ByteWriter};
use vcore::FormatError;

pub const TEMPLATE_COUNT_OFFSET: usize = 12;
pub const VISUAL_COUNT_OFFSET: usize = 152;
pub const TYPE_INFO_OFFSET: usize = 156;
pub const TYPE_INFO_LEN: usize = 40;
pub const HEADER_LEN: usize = TYPE_INFO_OFFSET + TYPE_INFO_LEN;

#[derive(Clone, PartialEq, Eq)]
pub struct Header {
    raw: Box<[u8; HEADER_LEN]>,
    template_count: i32,
    visual_count: i32,
}

impl Header {
    /// Decode the header from the start of the buffer.
    ///
    /// The counts are returned as found, a negative count is only rejected
    /// once the elements are decoded.
    pub fn decode(cursor: &mut ByteCursor) -> Result<Header, FormatError> {
        if cursor.remaining() < HEADER_LEN {
            return Err(FormatError::HeaderTooShort {
                len: cursor.remaining(),
                min: HEADER_LEN,
            });
        }

        let raw: [u8; HEADER_LEN] = cursor.read_array()?;
        let header = Header::from_bytes(raw);

        debug!(
            "header: template_count={} visual_count={}",
            header.template_count, header.visual_count
        );
        Ok(header)
    }

    pub fn from_bytes(raw: [u8; HEADER_LEN]) -> Header {
        let template_count = LittleEndian::read_i32(&raw[TEMPLATE_COUNT_OFFSET..]);
        let visual_count = LittleEndian::read_i32(&raw[VISUAL_COUNT_OFFSET..]);

        Header {
            raw: Box::new(raw),
            template_count,
            visual_count,
        }
    }

    /// Write the preserved bytes with the counts replaced by the actual
    /// collection lengths.
    pub fn encode(&self, writer: &mut ByteWriter, visual_len: usize, template_len: usize) {
        let start = writer.position();
        writer.write_bytes(&self.raw[..]);
        writer.patch_i32(start + TEMPLATE_COUNT_OFFSET, template_len as i32);
        writer.patch_i32(start + VISUAL_COUNT_OFFSET, visual_len as i32);
    }

    pub fn template_count(&self) -> i32 {
        self.template_count
    }

    pub fn visual_count(&self) -> i32 {
        self.visual_count
    }

    pub fn type_info(&self) -> &[u8] {
        &self.raw[TYPE_INFO_OFFSET..HEADER_LEN]
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.raw
    }

    /// Bring both count fields in line with the collections they describe.
    pub(crate) fn set_counts(&mut self, visual_len: usize, template_len: usize) {
        self.template_count = template_len as i32;
        self.visual_count = visual_len as i32;

        LittleEndian::write_i32(
            &mut self.raw[TEMPLATE_COUNT_OFFSET..],
            self.template_count,
        );
        LittleEndian::write_i32(&mut self.raw[VISUAL_COUNT_OFFSET..], self.visual_count);
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("template_count", &self.template_count)
            .field("visual_count", &self.visual_count)
            .field("len", &HEADER_LEN)
            .finish()
    }
}
