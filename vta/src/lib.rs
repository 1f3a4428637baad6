//! Visual Tree Asset codec
//!
//! A VTA is the serialized form of a UI template: two flat collections of
//! elements (plain visual elements and template instances) sandwiched between
//! a fixed size header and a footer of once-per-document tables. The layout is
//! not self describing, so this crate decodes it into a [`VtaDocument`] that
//! remembers every byte it does not understand and encodes it back verbatim.
//!
//! <div class="example-wrap" style="display:inline-block">
//! <pre class="compile_fail" style="white-space:normal;font:inherit;">
//!
//! **Warning**: The layout was reverse engineered from shipped assets. Only
//! the fields listed below are interpreted, everything else is opaque.
//!
//! </pre>
//! </div>
//!
//! # Top Level
//!
//! Unless otherwise noted everything is stored in Little Endian format and
//! every section starts on a 4-byte boundary.
//!
//! | Offset | Type   | Name      | Description |
//! | -----: | ------ | --------- | ----------- |
//! | 0      | [u8; 196] | header | See [`header`], holds both element counts |
//! | 196    | ...    | visual    | `visual_count` visual elements, back to back |
//! | ...    | ...    | template  | `template_count` template elements, back to back |
//! | ...    | ...    | footer    | See [`footer`], runs to the end of the buffer |
//!
//! There is no marker between the visual and the template elements, the
//! boundary is only known by decoding exactly `visual_count` elements.
//!
//! # Element
//!
//! | Type      | Name              | Description |
//! | --------: | ----------------- | ----------- |
//! | i32       | id                | Unique per document, the patch key |
//! | i32       | order_in_document | |
//! | i32       | parent_id         | `id` of the parent element |
//! | u32       | rule_index        | |
//! | [u8; 20]  | reserved          | Opaque |
//! | str array | classes           | See [`vcore::string`] |
//! | str array | stylesheet_paths  | |
//! | [u8; 16]  | serialized_data   | Opaque, i32 `rid` at byte 4 |
//! | str       | alias             | Template elements only, opaque bytes |
pub mod codec;
pub mod document;
pub mod element;
pub mod footer;
pub mod header;
pub mod patch;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use thiserror::Error;

pub use codec::{decode, encode};
pub use document::VtaDocument;
pub use element::{Element, ElementKind, TemplateElement, VisualElement};
pub use patch::{PatchError, PatchOp};
pub use vcore::FormatError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VtaError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Patch(#[from] PatchError),
}
