//! Document footer
//!
//! Everything after the last template element belongs to the footer. It is
//! kept as one opaque span, but its length has to come from its own structure
//! so a short or overlong buffer can be told apart from a valid one.
//!
//! | Type        | Name                 | Entry layout |
//! | ----------: | -------------------- | ------------ |
//! | table       | object_entries       | i32 parent id, i32 array |
//! | i32 array   | object_ids           | |
//! | table       | asset_entries        | str path, str type name, i32 file id, i64 path id |
//! | table       | slots                | str name, i32 array |
//! | i32         | content_container_id | |
//! | i32         | content_hash         | |
//!
//! A table or array is an i32 count followed by that many entries. Strings in
//! here are skipped, not validated.
use log::debug;

use vcore::buf::{encoded_string_len, ByteCursor, ByteWriter};
use vcore::string::read_count;
use vcore::FormatError;

const MIN_OBJECT_ENTRY_LEN: usize = 4 + 4;
const MIN_OBJECT_ID_LEN: usize = 4;
const ASSET_POINTER_LEN: usize = 4 + 8;
const MIN_ASSET_ENTRY_LEN: usize = 2 * encoded_string_len(0) + ASSET_POINTER_LEN;
const MIN_SLOT_LEN: usize = encoded_string_len(0) + 4;

/// Table sizes and trailing ids found in a footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterSummary {
    pub object_entries: usize,
    pub object_ids: usize,
    pub asset_entries: usize,
    pub slots: usize,
    pub content_container_id: i32,
    pub content_hash: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    raw: Vec<u8>,
}

impl Footer {
    pub fn decode(cursor: &mut ByteCursor) -> Result<Footer, FormatError> {
        let start = cursor.position();
        let summary = walk(cursor)?;

        let raw = cursor.span_since(start).to_vec();
        debug!("footer @ {}: {} bytes, {:?}", start, raw.len(), summary);

        Ok(Footer { raw })
    }

    pub fn encode(&self, writer: &mut ByteWriter) {
        writer.write_bytes(&self.raw[..]);
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[..]
    }

    pub fn summary(&self) -> Result<FooterSummary, FormatError> {
        walk(&mut ByteCursor::new(&self.raw))
    }
}

fn skip_i32_array(cursor: &mut ByteCursor, what: &'static str) -> Result<usize, FormatError> {
    let count = read_count(cursor, what, 4)?;
    cursor.skip(count * 4)?;
    Ok(count)
}

fn walk(cursor: &mut ByteCursor) -> Result<FooterSummary, FormatError> {
    let object_entries = read_count(cursor, "object entries", MIN_OBJECT_ENTRY_LEN)?;
    for _ in 0..object_entries {
        let _parent_id = cursor.read_i32()?;
        skip_i32_array(cursor, "object entry assets")?;
    }

    let object_ids = read_count(cursor, "object ids", MIN_OBJECT_ID_LEN)?;
    cursor.skip(object_ids * 4)?;

    let asset_entries = read_count(cursor, "asset entries", MIN_ASSET_ENTRY_LEN)?;
    for _ in 0..asset_entries {
        cursor.skip_length_prefixed()?;
        cursor.skip_length_prefixed()?;
        cursor.skip(ASSET_POINTER_LEN)?;
    }

    let slots = read_count(cursor, "slots", MIN_SLOT_LEN)?;
    for _ in 0..slots {
        cursor.skip_length_prefixed()?;
        skip_i32_array(cursor, "slot insertion points")?;
    }

    let content_container_id = cursor.read_i32()?;
    let content_hash = cursor.read_i32()?;

    Ok(FooterSummary {
        object_entries,
        object_ids,
        asset_entries,
        slots,
        content_container_id,
        content_hash,
    })
}
