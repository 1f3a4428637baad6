use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use vcore::buf::{encoded_string_len, ByteCursor, ByteWriter};
use vcore::opaque::Opaque;
use vcore::string::{read_string_array, string_array_len, write_string_array};
use vcore::FormatError;

pub const RESERVED_LEN: usize = 20;
pub const SERIALIZED_DATA_LEN: usize = 16;
pub const RID_OFFSET: usize = 4;

/// Offset of the classes array from the start of an element.
pub const CLASSES_OFFSET: usize = 16 + RESERVED_LEN;

/// Fixed fields, two empty string arrays and the serialized data block.
pub const MIN_ELEMENT_LEN: usize = CLASSES_OFFSET + 4 + 4 + SERIALIZED_DATA_LEN;

pub type Reserved = Opaque<RESERVED_LEN>;

/// Reference into the serialized payload side table of the container.
///
/// Only the `rid` is known, the rest of the block is carried as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerializedDataRef(Opaque<SERIALIZED_DATA_LEN>);

impl SerializedDataRef {
    pub fn rid(&self) -> i32 {
        LittleEndian::read_i32(&self.0.as_bytes()[RID_OFFSET..])
    }

    pub fn as_bytes(&self) -> &[u8; SERIALIZED_DATA_LEN] {
        self.0.as_bytes()
    }
}

impl From<[u8; SERIALIZED_DATA_LEN]> for SerializedDataRef {
    fn from(bytes: [u8; SERIALIZED_DATA_LEN]) -> Self {
        SerializedDataRef(Opaque::from(bytes))
    }
}

/// Fields shared by both kinds of element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: i32,
    pub order_in_document: i32,
    pub parent_id: i32,
    pub rule_index: u32,
    pub reserved: Reserved,
    pub classes: Vec<String>,
    pub stylesheet_paths: Vec<String>,
    pub serialized_data: SerializedDataRef,
}

impl Element {
    pub fn decode(cursor: &mut ByteCursor) -> Result<Element, FormatError> {
        let id = cursor.read_i32()?;
        let order_in_document = cursor.read_i32()?;
        let parent_id = cursor.read_i32()?;
        let rule_index = cursor.read_u32()?;
        let reserved = Reserved::from(cursor.read_array::<RESERVED_LEN>()?);
        let classes = read_string_array(cursor, "classes")?;
        let stylesheet_paths = read_string_array(cursor, "stylesheet paths")?;
        let serialized_data =
            SerializedDataRef::from(cursor.read_array::<SERIALIZED_DATA_LEN>()?);

        Ok(Element {
            id,
            order_in_document,
            parent_id,
            rule_index,
            reserved,
            classes,
            stylesheet_paths,
            serialized_data,
        })
    }

    pub fn encode(&self, writer: &mut ByteWriter) {
        writer.write_i32(self.id);
        writer.write_i32(self.order_in_document);
        writer.write_i32(self.parent_id);
        writer.write_u32(self.rule_index);
        writer.write_bytes(self.reserved.as_bytes());
        write_string_array(writer, &self.classes);
        write_string_array(writer, &self.stylesheet_paths);
        writer.write_bytes(self.serialized_data.as_bytes());
    }

    pub fn encoded_len(&self) -> usize {
        CLASSES_OFFSET
            + string_array_len(&self.classes)
            + string_array_len(&self.stylesheet_paths)
            + SERIALIZED_DATA_LEN
    }
}

/// Template alias, kept as raw bytes.
///
/// Stored like any other length prefixed string but the content is never
/// interpreted, it does not even have to be utf-8.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct TemplateAlias(Vec<u8>);

impl TemplateAlias {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn encoded_len(&self) -> usize {
        encoded_string_len(self.0.len())
    }
}

impl From<Vec<u8>> for TemplateAlias {
    fn from(bytes: Vec<u8>) -> Self {
        TemplateAlias(bytes)
    }
}

impl From<&str> for TemplateAlias {
    fn from(alias: &str) -> Self {
        TemplateAlias(alias.as_bytes().to_vec())
    }
}

impl fmt::Debug for TemplateAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateAlias({:?})", String::from_utf8_lossy(&self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Visual,
    Template,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Visual => write!(f, "visual"),
            ElementKind::Template => write!(f, "template"),
        }
    }
}

/// One on-disk element record, either variant.
///
/// The codec only needs to know how big the smallest record can be and how
/// to move it in and out of a buffer.
pub trait ElementRecord: Sized {
    const KIND: ElementKind;
    const MIN_LEN: usize;

    fn decode(cursor: &mut ByteCursor) -> Result<Self, FormatError>;
    fn encode(&self, writer: &mut ByteWriter);
    fn encoded_len(&self) -> usize;

    fn element(&self) -> &Element;
    fn element_mut(&mut self) -> &mut Element;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualElement {
    pub element: Element,
}

impl ElementRecord for VisualElement {
    const KIND: ElementKind = ElementKind::Visual;
    const MIN_LEN: usize = MIN_ELEMENT_LEN;

    fn decode(cursor: &mut ByteCursor) -> Result<Self, FormatError> {
        let offset = cursor.position();
        let element = Element::decode(cursor)?;
        trace!("visual element {} @ {}", element.id, offset);

        Ok(VisualElement { element })
    }

    fn encode(&self, writer: &mut ByteWriter) {
        self.element.encode(writer);
    }

    fn encoded_len(&self) -> usize {
        self.element.encoded_len()
    }

    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateElement {
    pub element: Element,
    pub alias: TemplateAlias,
}

impl ElementRecord for TemplateElement {
    const KIND: ElementKind = ElementKind::Template;
    const MIN_LEN: usize = MIN_ELEMENT_LEN + encoded_string_len(0);

    fn decode(cursor: &mut ByteCursor) -> Result<Self, FormatError> {
        let offset = cursor.position();
        let element = Element::decode(cursor)?;
        let alias = TemplateAlias(cursor.read_length_prefixed_bytes()?.to_vec());
        trace!("template element {} @ {} alias {:?}", element.id, offset, alias);

        Ok(TemplateElement { element, alias })
    }

    fn encode(&self, writer: &mut ByteWriter) {
        self.element.encode(writer);
        writer.write_length_prefixed_bytes(self.alias.as_bytes());
    }

    fn encoded_len(&self) -> usize {
        self.element.encoded_len() + self.alias.encoded_len()
    }

    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}
