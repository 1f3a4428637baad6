//! Class list edits
//!
//! Every edit looks its target up by element id across both collections and
//! validates the whole request before touching anything, so a failed edit
//! leaves the document exactly as it was. None of them change the element
//! counts, the header is never rewritten by a patch.
use log::debug;
use thiserror::Error;

use crate::document::{ElementLocation, VtaDocument};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("no element with id {0}")]
    ElementNotFound(i32),
    #[error("element id {0} is not unique")]
    DuplicateElementId(i32),
    #[error("class #{index} for element {element} is empty")]
    EmptyClassName { element: i32, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOp {
    /// Replace the class list.
    SetClasses { element: i32, classes: Vec<String> },
    /// Append the classes that are not already present.
    AddClasses { element: i32, classes: Vec<String> },
    /// Drop every occurrence of the classes.
    RemoveClasses { element: i32, classes: Vec<String> },
    /// Exchange the class lists of two elements.
    SwapClasses { a: i32, b: i32 },
}

fn check_class_names(element: i32, classes: &[String]) -> Result<(), PatchError> {
    match classes.iter().position(|c| c.is_empty()) {
        Some(index) => Err(PatchError::EmptyClassName { element, index }),
        None => Ok(()),
    }
}

impl VtaDocument {
    /// The single location holding `id`.
    pub fn locate(&self, id: i32) -> Result<ElementLocation, PatchError> {
        let found = self.find(id);
        match found.as_slice() {
            [] => Err(PatchError::ElementNotFound(id)),
            [location] => Ok(*location),
            _ => Err(PatchError::DuplicateElementId(id)),
        }
    }

    pub fn set_classes(&mut self, id: i32, classes: Vec<String>) -> Result<(), PatchError> {
        let location = self.locate(id)?;
        check_class_names(id, &classes)?;

        debug!("set classes {}: {:?}", id, classes);
        self.element_at_mut(location).classes = classes;
        Ok(())
    }

    pub fn add_classes(&mut self, id: i32, classes: &[String]) -> Result<(), PatchError> {
        let location = self.locate(id)?;
        check_class_names(id, classes)?;

        let element = self.element_at_mut(location);
        for class in classes {
            if !element.classes.contains(class) {
                element.classes.push(class.clone());
            }
        }
        debug!("add classes {}: {:?}", id, element.classes);
        Ok(())
    }

    pub fn remove_classes(&mut self, id: i32, classes: &[String]) -> Result<(), PatchError> {
        let location = self.locate(id)?;

        let element = self.element_at_mut(location);
        element.classes.retain(|c| !classes.contains(c));
        debug!("remove classes {}: {:?}", id, element.classes);
        Ok(())
    }

    pub fn swap_classes(&mut self, a: i32, b: i32) -> Result<(), PatchError> {
        let loc_a = self.locate(a)?;
        let loc_b = self.locate(b)?;

        let classes_a = std::mem::take(&mut self.element_at_mut(loc_a).classes);
        let classes_b = std::mem::replace(&mut self.element_at_mut(loc_b).classes, classes_a);
        self.element_at_mut(loc_a).classes = classes_b;

        debug!("swap classes {} <-> {}", a, b);
        Ok(())
    }

    pub fn apply(&mut self, op: &PatchOp) -> Result<(), PatchError> {
        match op {
            PatchOp::SetClasses { element, classes } => {
                self.set_classes(*element, classes.clone())
            }
            PatchOp::AddClasses { element, classes } => self.add_classes(*element, classes),
            PatchOp::RemoveClasses { element, classes } => {
                self.remove_classes(*element, classes)
            }
            PatchOp::SwapClasses { a, b } => self.swap_classes(*a, *b),
        }
    }
}

/// Copy of `document` with the classes of `id` replaced.
pub fn set_classes(
    document: &VtaDocument,
    id: i32,
    classes: Vec<String>,
) -> Result<VtaDocument, PatchError> {
    let mut patched = document.clone();
    patched.set_classes(id, classes)?;
    Ok(patched)
}

/// Apply every op in order to a copy of `document`. Either all of them
/// succeed or the error of the first failing one is returned.
pub fn apply_all(document: &VtaDocument, ops: &[PatchOp]) -> Result<VtaDocument, PatchError> {
    let mut patched = document.clone();
    for op in ops {
        patched.apply(op)?;
    }
    Ok(patched)
}
