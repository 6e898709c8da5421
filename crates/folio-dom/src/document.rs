//! Document - High-level document API

use crate::{layout_blocks, DOMRect, DomResult, DomTree, InternedString, NodeId, Selector};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Layout width used by the last layout pass
    width: f64,
    /// Total document height from the last layout pass
    scroll_height: f64,
    /// Set by mutations, cleared by [`Document::layout`]
    layout_dirty: bool,
}

impl Document {
    /// Create a new document with `<html><head/><body/></html>`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes cannot fail to attach
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            body_element: body,
            width: 1280.0,
            scroll_height: 0.0,
            layout_dirty: true,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID (connected elements only)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let id_interned = self.tree.lookup(id)?;
        self.find_element_with_id(id_interned)
    }

    fn find_element_with_id(&self, target_id: InternedString) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|(_, node)| node.as_element().is_some_and(|e| e.id == Some(target_id)))
            .map(|(id, _)| id)
    }

    /// First connected element matching the selector, in document order
    pub fn query_selector(&self, selector: &Selector) -> Option<NodeId> {
        // Id lookups are by far the common case
        if let [crate::SimpleSelector::Id(id)] = selector.parts() {
            return self.get_element_by_id(id);
        }
        self.query_selector_all(selector).into_iter().next()
    }

    /// All connected elements matching the selector
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .filter(|(_, node)| {
                node.as_element()
                    .is_some_and(|e| selector.matches(&self.tree, e))
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Document-relative box of a connected element
    pub fn bounding_rect(&self, node: NodeId) -> Option<DOMRect> {
        if !self.tree.is_connected(node) {
            return None;
        }
        self.tree.get(node)?.as_element().map(|e| e.rect)
    }

    /// Build an element with an id and a declared height, appended to `parent`
    pub fn mount_section(&mut self, parent: NodeId, tag: &str, id: &str, height: f64) -> DomResult<NodeId> {
        let node = self.tree.create_element(tag);
        self.tree.set_id(node, id)?;
        self.tree.set_height(node, height)?;
        self.tree.append_child(parent, node)?;
        self.layout_dirty = true;
        Ok(node)
    }

    /// Detach every child of <body>
    pub fn clear_body(&mut self) -> DomResult<()> {
        self.tree.clear_children(self.body_element)?;
        self.layout_dirty = true;
        Ok(())
    }

    /// Re-run block layout if the tree changed
    pub fn layout(&mut self) -> f64 {
        if self.layout_dirty {
            let root = self.tree.root();
            self.scroll_height = layout_blocks(&mut self.tree, root, self.width);
            self.layout_dirty = false;
        }
        self.scroll_height
    }

    /// Set the layout width and invalidate layout
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.layout_dirty = true;
    }

    /// Total document height (as of the last layout)
    pub fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    pub fn needs_layout(&self) -> bool {
        self.layout_dirty
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably; marks layout dirty
    pub fn tree_mut(&mut self) -> &mut DomTree {
        self.layout_dirty = true;
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
