use std::collections::HashSet;

use crate::element::{Element, ElementKind, ElementRecord, TemplateElement, VisualElement};
use crate::footer::Footer;
use crate::header::{Header, HEADER_LEN};

/// Parent id carried by the top level elements.
pub const ROOT_PARENT_ID: i32 = 0;

/// Where an element lives inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLocation {
    pub kind: ElementKind,
    pub index: usize,
}

/// A fully decoded VTA.
///
/// Only [`crate::codec::decode`] creates one, and the header counts always
/// match the collection lengths. The only way to change it is through the
/// patch operations, see [`crate::patch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VtaDocument {
    header: Header,
    visual_elements: Vec<VisualElement>,
    template_elements: Vec<TemplateElement>,
    footer: Footer,
}

impl VtaDocument {
    pub(crate) fn from_parts(
        mut header: Header,
        visual_elements: Vec<VisualElement>,
        template_elements: Vec<TemplateElement>,
        footer: Footer,
    ) -> Self {
        header.set_counts(visual_elements.len(), template_elements.len());

        VtaDocument {
            header,
            visual_elements,
            template_elements,
            footer,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn visual_elements(&self) -> &[VisualElement] {
        &self.visual_elements[..]
    }

    pub fn template_elements(&self) -> &[TemplateElement] {
        &self.template_elements[..]
    }

    pub fn footer(&self) -> &Footer {
        &self.footer
    }

    /// All elements in on-disk order, visual first.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.visual_elements
            .iter()
            .map(|v| &v.element)
            .chain(self.template_elements.iter().map(|t| &t.element))
    }

    pub fn element(&self, id: i32) -> Option<&Element> {
        self.elements().find(|e| e.id == id)
    }

    /// Every location holding an element with this id.
    pub fn find(&self, id: i32) -> Vec<ElementLocation> {
        let visual = self
            .visual_elements
            .iter()
            .enumerate()
            .filter(|(_, v)| v.element.id == id)
            .map(|(index, _)| ElementLocation {
                kind: ElementKind::Visual,
                index,
            });
        let template = self
            .template_elements
            .iter()
            .enumerate()
            .filter(|(_, t)| t.element.id == id)
            .map(|(index, _)| ElementLocation {
                kind: ElementKind::Template,
                index,
            });

        visual.chain(template).collect()
    }

    pub(crate) fn element_at(&self, location: ElementLocation) -> &Element {
        match location.kind {
            ElementKind::Visual => self.visual_elements[location.index].element(),
            ElementKind::Template => self.template_elements[location.index].element(),
        }
    }

    pub(crate) fn element_at_mut(&mut self, location: ElementLocation) -> &mut Element {
        match location.kind {
            ElementKind::Visual => self.visual_elements[location.index].element_mut(),
            ElementKind::Template => self.template_elements[location.index].element_mut(),
        }
    }

    /// Byte offset each element would be encoded at, in on-disk order.
    pub fn element_offsets(&self) -> Vec<(ElementLocation, usize)> {
        let mut offset = HEADER_LEN;
        let mut offsets =
            Vec::with_capacity(self.visual_elements.len() + self.template_elements.len());

        for (index, v) in self.visual_elements.iter().enumerate() {
            let location = ElementLocation {
                kind: ElementKind::Visual,
                index,
            };
            offsets.push((location, offset));
            offset += v.encoded_len();
        }
        for (index, t) in self.template_elements.iter().enumerate() {
            let location = ElementLocation {
                kind: ElementKind::Template,
                index,
            };
            offsets.push((location, offset));
            offset += t.encoded_len();
        }
        offsets
    }

    /// Elements pointing at a parent that is not in this document.
    ///
    /// The tree itself is never walked, this only checks the ids exist.
    pub fn dangling_parents(&self) -> Vec<&Element> {
        let ids: HashSet<i32> = self.elements().map(|e| e.id).collect();

        self.elements()
            .filter(|e| e.parent_id != ROOT_PARENT_ID && !ids.contains(&e.parent_id))
            .collect()
    }

    /// Ids that appear on more than one element.
    pub fn duplicate_ids(&self) -> Vec<i32> {
        let mut seen = HashSet::new();
        let mut dups: Vec<i32> = self
            .elements()
            .map(|e| e.id)
            .filter(|id| !seen.insert(*id))
            .collect();
        dups.sort_unstable();
        dups.dedup();
        dups
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_LEN
            + self
                .visual_elements
                .iter()
                .map(|v| v.encoded_len())
                .sum::<usize>()
            + self
                .template_elements
                .iter()
                .map(|t| t.encoded_len())
                .sum::<usize>()
            + self.footer.len()
    }
}
