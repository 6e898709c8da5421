//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: detaching a subtree only unlinks it, so ids held
//! elsewhere stay valid and simply stop being connected.

use crate::{InternedString, Node, NodeId, StringInterner};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Operation needs an element
    #[error("Invalid node type")]
    InvalidNodeType,
}

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes ever allocated
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve an interned string
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.resolve(s)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.interner.lookup(s)
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let tag = self.interner.intern(&tag.to_ascii_lowercase());
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut crate::ElementData> {
        self.nodes
            .get_mut(id.index())
            .ok_or(DomError::NotFound)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)
    }

    /// Set the id attribute
    pub fn set_id(&mut self, node: NodeId, id: &str) -> DomResult<()> {
        let id = self.interner.intern(id);
        self.element_mut(node)?.id = Some(id);
        Ok(())
    }

    /// Add a class
    pub fn add_class(&mut self, node: NodeId, class: &str) -> DomResult<()> {
        let class = self.interner.intern(class);
        let elem = self.element_mut(node)?;
        if !elem.has_class(class) {
            elem.classes.push(class);
        }
        Ok(())
    }

    /// Declare the block height used by layout
    pub fn set_height(&mut self, node: NodeId, height: f64) -> DomResult<()> {
        self.element_mut(node)?.height = height.max(0.0);
        Ok(())
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        self.detach(child)?;

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;

        Ok(child)
    }

    /// Unlink a node (and its subtree) from its parent
    pub fn detach(&mut self, node: NodeId) -> DomResult<()> {
        let (parent, prev, next) = {
            let n = self.get(node).ok_or(DomError::NotFound)?;
            (n.parent, n.prev_sibling, n.next_sibling)
        };
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let n = &mut self.nodes[node.index()];
        n.parent = NodeId::NONE;
        n.prev_sibling = NodeId::NONE;
        n.next_sibling = NodeId::NONE;
        Ok(())
    }

    /// Remove every child of `parent`
    pub fn clear_children(&mut self, parent: NodeId) -> DomResult<()> {
        let children: Vec<NodeId> = self.children(parent).map(|(id, _)| id).collect();
        for child in children {
            self.detach(child)?;
        }
        Ok(())
    }

    /// Parent of a node, if attached
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Is `ancestor` a strict ancestor of `node`?
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Is the node reachable from the document root?
    pub fn is_connected(&self, node: NodeId) -> bool {
        node == self.root() || self.is_ancestor(self.root(), node)
    }

    /// Iterate direct children
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let next = self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Iterate all descendants of `root` in document order (root excluded)
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let next = self.get(root).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Descendants { tree: self, root, next }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Child iterator
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order descendant iterator, walks sibling links without a stack
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut current = id;
            loop {
                if current == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(current) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                if !n.parent.is_valid() || n.parent == self.root {
                    break NodeId::NONE;
                }
                current = n.parent;
            }
        };

        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_children() {
        let mut tree = DomTree::new();
        let a = tree.create_element("section");
        let b = tree.create_element("section");
        tree.append_child(tree.root(), a).unwrap();
        tree.append_child(tree.root(), b).unwrap();

        let children: Vec<NodeId> = tree.children(tree.root()).map(|(id, _)| id).collect();
        assert_eq!(children, vec![a, b]);
        assert!(tree.is_connected(a));
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = DomTree::new();
        let main = tree.create_element("main");
        let s1 = tree.create_element("section");
        let s1_child = tree.create_element("div");
        let s2 = tree.create_element("section");
        tree.append_child(tree.root(), main).unwrap();
        tree.append_child(main, s1).unwrap();
        tree.append_child(s1, s1_child).unwrap();
        tree.append_child(main, s2).unwrap();

        let order: Vec<NodeId> = tree.descendants(tree.root()).map(|(id, _)| id).collect();
        assert_eq!(order, vec![main, s1, s1_child, s2]);

        // Scoped walk stops at the subtree boundary
        let scoped: Vec<NodeId> = tree.descendants(s1).map(|(id, _)| id).collect();
        assert_eq!(scoped, vec![s1_child]);
    }

    #[test]
    fn test_detach_disconnects_subtree() {
        let mut tree = DomTree::new();
        let page = tree.create_element("div");
        let section = tree.create_element("section");
        tree.append_child(tree.root(), page).unwrap();
        tree.append_child(page, section).unwrap();

        tree.detach(page).unwrap();
        assert!(!tree.is_connected(section));
        assert_eq!(tree.children(tree.root()).count(), 0);
    }

    #[test]
    fn test_hierarchy_error() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        tree.append_child(outer, inner).unwrap();
        assert_eq!(tree.append_child(inner, outer), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_text_nodes_reject_element_ops() {
        let mut tree = DomTree::new();
        let text = tree.create_text("Florian");
        assert_eq!(tree.set_id(text, "x"), Err(DomError::InvalidNodeType));
    }
}
