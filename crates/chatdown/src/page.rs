//! Read-only indexed view over a page tree.
//!
//! A [`Page`] flattens a [`Node`] tree into a pre-order arena. Node ids are
//! pre-order positions, which gives cheap tree-order comparison, ancestor
//! containment and parent walks without parent pointers in the tree itself.

use std::cmp::Ordering;

use crate::markers::Marker;
use crate::node::Node;

/// Identifier of a node attached to a [`Page`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Entry {
    /// Shallow copy of the node (no children)
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Last id inside this node's subtree
    last: NodeId,
}

/// An immutable snapshot of a rendered page
#[derive(Debug)]
pub struct Page {
    entries: Vec<Entry>,
}

impl Page {
    /// Index a node tree
    pub fn from_node(root: Node) -> Self {
        let mut entries = Vec::new();
        index_node(root, None, &mut entries);
        Self { entries }
    }

    /// Parse an HTML document into a page
    #[cfg(feature = "html")]
    pub fn parse(html: &str) -> Self {
        Self::from_node(crate::html::parse_document(html))
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The node itself, without children
    pub fn node(&self, id: NodeId) -> &Node {
        &self.entries[id.0].node
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.entries[id.0].children
    }

    /// Ids of all descendants of `id` (excluding `id`) in tree order
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> {
        (id.0 + 1..=self.entries[id.0].last.0).map(NodeId)
    }

    /// Check whether `other` is `ancestor` or one of its descendants
    pub fn contains(&self, ancestor: NodeId, other: NodeId) -> bool {
        ancestor <= other && other <= self.entries[ancestor.0].last
    }

    /// Compare two nodes by tree order
    ///
    /// `Less` means `a` precedes `b` in the document (an ancestor precedes
    /// its descendants). Only a node compared with itself is `Equal`.
    pub fn compare_document_position(&self, a: NodeId, b: NodeId) -> Ordering {
        a.cmp(&b)
    }

    /// All nodes of the page matching a marker, in tree order
    pub fn select(&self, marker: &Marker) -> Vec<NodeId> {
        (0..self.entries.len())
            .map(NodeId)
            .filter(|id| marker.matches(self.node(*id)))
            .collect()
    }

    /// Descendants of `id` matching a marker, in tree order
    pub fn select_within(&self, id: NodeId, marker: &Marker) -> Vec<NodeId> {
        self.descendants(id)
            .filter(|d| marker.matches(self.node(*d)))
            .collect()
    }

    /// First descendant of `id` matching a marker
    pub fn find_within(&self, id: NodeId, marker: &Marker) -> Option<NodeId> {
        self.descendants(id).find(|d| marker.matches(self.node(*d)))
    }

    /// Nearest node matching a marker, starting at `id` itself and walking up
    pub fn closest(&self, id: NodeId, marker: &Marker) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if marker.matches(self.node(candidate)) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Text content of a node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if self.node(id).is_text() {
            out.push_str(self.node(id).node_value.as_deref().unwrap_or(""));
        }
        for d in self.descendants(id) {
            let node = self.node(d);
            if node.is_text() {
                out.push_str(node.node_value.as_deref().unwrap_or(""));
            }
        }
        out
    }

    /// Deep copy of the subtree rooted at `id`
    ///
    /// The copy is detached: pruning it never affects the page.
    pub fn detach(&self, id: NodeId) -> Node {
        let mut node = self.node(id).shallow_clone();
        for child in self.children(id) {
            node.add_child(self.detach(*child));
        }
        node
    }

    /// Text of the first `<title>` element, if any
    pub fn title(&self) -> Option<String> {
        (0..self.entries.len())
            .map(NodeId)
            .find(|id| self.node(*id).is_tag("title"))
            .map(|id| self.text_content(id))
    }
}

fn index_node(mut node: Node, parent: Option<NodeId>, entries: &mut Vec<Entry>) -> NodeId {
    let id = NodeId(entries.len());
    let children = node.children.take();
    if node.is_element() {
        node.children = Some(Vec::new());
    }

    entries.push(Entry {
        node,
        parent,
        children: Vec::new(),
        last: id,
    });

    for child in children.into_iter().flatten() {
        let child_id = index_node(child, Some(id), entries);
        entries[id.0].children.push(child_id);
    }

    entries[id.0].last = NodeId(entries.len() - 1);
    id
}
