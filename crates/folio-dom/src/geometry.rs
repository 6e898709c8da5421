//! Geometry APIs
//!
//! DOMRect and a vertical block-flow layout: every element stacks its
//! element children top to bottom and is at least as tall as its declared
//! height.

use crate::{DomTree, NodeId};

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge (same as y)
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if rects intersect
    pub fn intersects(&self, other: &DOMRect) -> bool {
        !(self.x + self.width < other.x
            || self.x > other.x + other.width
            || self.bottom() < other.y
            || self.y > other.bottom())
    }
}

/// Lay out the subtree under `root` starting at the document origin.
///
/// Returns the total height of the laid-out subtree.
pub fn layout_blocks(tree: &mut DomTree, root: NodeId, width: f64) -> f64 {
    let height = layout_node(tree, root, 0.0, width);
    tracing::debug!("Block layout: {} px tall", height);
    height
}

fn layout_node(tree: &mut DomTree, node: NodeId, y: f64, width: f64) -> f64 {
    let children: Vec<NodeId> = tree
        .children(node)
        .filter(|(_, n)| n.is_element())
        .map(|(id, _)| id)
        .collect();

    let mut cursor = y;
    for child in children {
        cursor += layout_node(tree, child, cursor, width);
    }
    let content = cursor - y;

    let Some(elem) = tree.get_mut(node).and_then(|n| n.as_element_mut()) else {
        return content;
    };
    let height = elem.height.max(content);
    elem.rect = DOMRect::from_xywh(0.0, y, width, height);
    height
}
