//! Synthetic documents for tests.
//!
//! Buffers are assembled from the same writer the codec uses, but the header
//! and footer bytes are filled in by hand so they are not just echoes of the
//! decoder.
use vcore::buf::ByteWriter;

use crate::element::{
    Element, ElementRecord, Reserved, SerializedDataRef, TemplateAlias, TemplateElement,
    VisualElement, RESERVED_LEN, SERIALIZED_DATA_LEN,
};
use crate::header::{HEADER_LEN, TEMPLATE_COUNT_OFFSET, VISUAL_COUNT_OFFSET};

/// A plausible element, `rid` and the opaque blocks derive from `id` so no
/// two sample elements look alike.
pub fn sample_element(id: i32, parent_id: i32, classes: &[&str]) -> Element {
    let mut reserved = [0u8; RESERVED_LEN];
    reserved[8..12].clone_from_slice(&(-1i32).to_le_bytes());
    reserved[16] = id as u8;

    let mut serialized = [0u8; SERIALIZED_DATA_LEN];
    serialized[4..8].clone_from_slice(&(id + 1000).to_le_bytes());
    serialized[8..12].clone_from_slice(&(-1i32).to_le_bytes());

    Element {
        id,
        order_in_document: id % 100,
        parent_id,
        rule_index: u32::MAX,
        reserved: Reserved::from(reserved),
        classes: classes.iter().map(|c| c.to_string()).collect(),
        stylesheet_paths: vec![format!("Assets/UI/Styles/element-{}.uss", id)],
        serialized_data: SerializedDataRef::from(serialized),
    }
}

/// 196 bytes of non-zero filler with the two counts patched in.
pub fn sample_header(visual_count: i32, template_count: i32) -> Vec<u8> {
    let mut raw: Vec<u8> = (0..HEADER_LEN).map(|i| (i * 7 % 253) as u8 + 1).collect();
    raw[TEMPLATE_COUNT_OFFSET..TEMPLATE_COUNT_OFFSET + 4]
        .clone_from_slice(&template_count.to_le_bytes());
    raw[VISUAL_COUNT_OFFSET..VISUAL_COUNT_OFFSET + 4]
        .clone_from_slice(&visual_count.to_le_bytes());
    raw
}

/// One entry in every footer table.
pub fn sample_footer() -> Vec<u8> {
    let mut writer = ByteWriter::new();

    // object entries
    writer.write_i32(1);
    writer.write_i32(5);
    writer.write_i32(2);
    writer.write_i32(100);
    writer.write_i32(101);

    // object ids
    writer.write_i32(2);
    writer.write_i32(100);
    writer.write_i32(101);

    // asset entries
    writer.write_i32(1);
    writer.write_length_prefixed_string("Assets/UI/Styles/Card.uss");
    writer.write_length_prefixed_string("UnityEngine.UIElements.StyleSheet");
    writer.write_i32(0);
    writer.write_i64(-4_812_349_112_201_987_101);

    // slots
    writer.write_i32(1);
    writer.write_length_prefixed_string("content");
    writer.write_i32(1);
    writer.write_i32(3);

    // content container id + hash
    writer.write_i32(42);
    writer.write_i32(0x1234_5678);

    writer.into_inner()
}

/// Builds a complete VTA buffer.
#[derive(Default)]
pub struct VtaBuilder {
    visual: Vec<VisualElement>,
    template: Vec<TemplateElement>,
}

impl VtaBuilder {
    pub fn new() -> Self {
        VtaBuilder::default()
    }

    pub fn visual(mut self, element: Element) -> Self {
        self.visual.push(VisualElement { element });
        self
    }

    pub fn template(mut self, element: Element, alias: &str) -> Self {
        self.template.push(TemplateElement {
            element,
            alias: TemplateAlias::from(alias),
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer.write_bytes(&sample_header(
            self.visual.len() as i32,
            self.template.len() as i32,
        ));
        for v in self.visual.iter() {
            v.encode(&mut writer);
        }
        for t in self.template.iter() {
            t.encode(&mut writer);
        }
        writer.write_bytes(&sample_footer());
        writer.into_inner()
    }
}

/// Two visual elements under a root and one template instance.
pub fn sample_document() -> Vec<u8> {
    VtaBuilder::new()
        .visual(sample_element(1426098328, 0, &["about-club-card"]))
        .visual(sample_element(
            1426098329,
            1426098328,
            &["card__body", "card__body--dense", "card__body"],
        ))
        .template(sample_element(1426098330, 1426098329, &[]), "ClubBadge")
        .build()
}
