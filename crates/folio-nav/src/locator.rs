//! Element Locator
//!
//! Anchors are looked up as `#<anchor>` selectors against the current
//! document. Lookups have no side effects, so the same anchor can be polled
//! as often as needed.

use folio_dom::{DOMRect, Document, NodeId, Selector};

use crate::NavError;

/// A located anchor target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatedElement {
    pub node: NodeId,
    /// Document-relative box
    pub rect: DOMRect,
}

/// Finds the element an anchor names
pub trait ElementLocator {
    /// `ElementNotFound` when nothing matches yet, `InvalidSelector` when
    /// the anchor cannot name an element at all
    fn locate(&self, anchor: &str) -> Result<LocatedElement, NavError>;
}

impl ElementLocator for Document {
    fn locate(&self, anchor: &str) -> Result<LocatedElement, NavError> {
        let selector = Selector::id(anchor).map_err(|source| NavError::InvalidSelector {
            anchor: anchor.to_string(),
            source,
        })?;

        let node = self
            .query_selector(&selector)
            .ok_or_else(|| NavError::ElementNotFound(anchor.to_string()))?;
        let rect = self
            .bounding_rect(node)
            .ok_or_else(|| NavError::ElementNotFound(anchor.to_string()))?;

        Ok(LocatedElement { node, rect })
    }
}
