use std::ops::Range;

use log::debug;

use vcore::buf::{ByteCursor, ByteWriter};
use vcore::string::string_array_len;
use vcore::FormatError;

use crate::document::VtaDocument;
use crate::element::{ElementRecord, TemplateElement, VisualElement, CLASSES_OFFSET};
use crate::footer::Footer;
use crate::header::Header;
use crate::patch::{apply_all, PatchError, PatchOp};
use crate::VtaError;

/// Decode exactly `count` records, back to back.
///
/// The count comes from the header and is checked against the smallest
/// possible record before anything is allocated.
fn decode_collection<T: ElementRecord>(
    cursor: &mut ByteCursor,
    count: i32,
    what: &'static str,
) -> Result<Vec<T>, FormatError> {
    let offset = cursor.position();
    if count < 0 || (count as usize).saturating_mul(T::MIN_LEN) > cursor.remaining() {
        return Err(FormatError::ArrayCountImplausible {
            what,
            count,
            offset,
        });
    }

    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        records.push(T::decode(cursor)?);
    }
    debug!("{} {} elements @ {}..{}", count, T::KIND, offset, cursor.position());

    Ok(records)
}

/// Decode a whole VTA buffer. The buffer must be consumed exactly.
pub fn decode(bytes: &[u8]) -> Result<VtaDocument, FormatError> {
    let mut cursor = ByteCursor::new(bytes);

    let header = Header::decode(&mut cursor)?;
    let visual: Vec<VisualElement> =
        decode_collection(&mut cursor, header.visual_count(), "visual elements")?;
    let template: Vec<TemplateElement> =
        decode_collection(&mut cursor, header.template_count(), "template elements")?;
    let footer = Footer::decode(&mut cursor)?;

    if cursor.remaining() != 0 {
        return Err(FormatError::TrailingBytes {
            offset: cursor.position(),
            count: cursor.remaining(),
        });
    }

    Ok(VtaDocument::from_parts(header, visual, template, footer))
}

pub fn encode(document: &VtaDocument) -> Vec<u8> {
    let mut writer = ByteWriter::with_capacity(document.encoded_len());

    let visual = document.visual_elements();
    let template = document.template_elements();

    document
        .header()
        .encode(&mut writer, visual.len(), template.len());
    for v in visual {
        v.encode(&mut writer);
    }
    for t in template {
        t.encode(&mut writer);
    }
    document.footer().encode(&mut writer);

    writer.into_inner()
}

/// Decode then encode, and check the result is the input.
pub fn verify_round_trip(bytes: &[u8]) -> Result<VtaDocument, FormatError> {
    let document = decode(bytes)?;
    let encoded = encode(&document);

    if encoded[..] != bytes[..] {
        let offset = encoded
            .iter()
            .zip(bytes.iter())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| encoded.len().min(bytes.len()));
        return Err(FormatError::RoundTripMismatch { offset });
    }
    Ok(document)
}

/// Byte range the classes array of `id` occupies when `document` is encoded.
pub fn classes_span(document: &VtaDocument, id: i32) -> Result<Range<usize>, PatchError> {
    let location = document.locate(id)?;

    let (_, offset) = document
        .element_offsets()
        .into_iter()
        .find(|(l, _)| *l == location)
        .ok_or(PatchError::ElementNotFound(id))?;

    let start = offset + CLASSES_OFFSET;
    let len = string_array_len(&document.element_at(location).classes);
    Ok(start..start + len)
}

/// Decode, apply every op and encode again.
pub fn patch_bytes(bytes: &[u8], ops: &[PatchOp]) -> Result<Vec<u8>, VtaError> {
    let document = decode(bytes)?;
    let patched = apply_all(&document, ops)?;
    Ok(encode(&patched))
}
