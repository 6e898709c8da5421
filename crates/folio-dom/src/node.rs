//! Arena nodes
//!
//! Nodes link to each other through [`NodeId`]s (4 bytes) instead of
//! pointers, which keeps detach/reattach of whole page subtrees cheap.

use crate::{DOMRect, InternedString, NodeId};

/// One arena slot: tree links plus payload
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// Links to neighbours, `NodeId::NONE` when absent
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Detached element
    pub fn element(tag: InternedString) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }
}

/// Payload of a node
#[derive(Debug)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
}

/// Element payload: what selectors and layout read
#[derive(Debug)]
pub struct ElementData {
    /// Tag name
    pub tag: InternedString,
    /// Cached id attribute (the anchor lookup key)
    pub id: Option<InternedString>,
    /// Class list
    pub classes: Vec<InternedString>,
    /// Declared block height in CSS pixels; 0 means "size to children"
    pub height: f64,
    /// Document-relative box, written by [`crate::layout_blocks`]
    pub rect: DOMRect,
}

impl ElementData {
    pub fn new(tag: InternedString) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            height: 0.0,
            rect: DOMRect::default(),
        }
    }

    /// Check class membership
    pub fn has_class(&self, class: InternedString) -> bool {
        self.classes.contains(&class)
    }
}

