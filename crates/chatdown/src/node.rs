//! CDP-style DOM Node structure for page trees.
//!
//! Nodes are plain owned trees. They are used to build pages (see
//! [`crate::Page`]) and as detached copies of page subtrees that renderers
//! may prune without touching the page itself.

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
}

/// A DOM node following the CDP DOM.Node structure.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, etc.)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g., "DIV", "#text" for text nodes)
    pub node_name: String,

    /// Text content for text and comment nodes
    pub node_value: Option<String>,

    /// Attributes as flat array [name, value, name, value, ...] (CDP style)
    /// Only present for element nodes
    pub attributes: Option<Vec<String>>,

    /// Child nodes
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(Vec::new()),
            children: Some(Vec::new()),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let flat_attrs: Vec<String> = attrs
            .into_iter()
            .flat_map(|(k, v)| [k.to_string(), v.to_string()])
            .collect();

        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(flat_attrs),
            children: Some(Vec::new()),
        }
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            node_name: "#comment".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Check the tag name, ignoring case
    pub fn is_tag(&self, tag: &str) -> bool {
        self.is_element() && self.node_name.eq_ignore_ascii_case(tag)
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attrs = self.attributes.as_ref()?;

        // CDP stores attributes as flat array: [name, value, name, value, ...]
        attrs
            .chunks_exact(2)
            .find(|pair| pair[0].eq_ignore_ascii_case(name))
            .map(|pair| pair[1].as_str())
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Iterate over the whitespace-separated class tokens
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// Check for an exact class token
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Check if the raw class attribute contains a substring
    pub fn class_contains(&self, needle: &str) -> bool {
        self.attr("class").is_some_and(|c| c.contains(needle))
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flat_map(|c| c.iter())
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        if let Some(ref mut children) = self.children {
            children.push(child);
        } else {
            self.children = Some(vec![child]);
        }
    }

    /// Builder form of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text_content(&mut out);
        out
    }

    fn push_text_content(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text => out.push_str(self.node_value.as_deref().unwrap_or("")),
            NodeType::Comment => {}
            NodeType::Element => {
                for child in self.children() {
                    child.push_text_content(out);
                }
            }
        }
    }

    /// Find the first descendant (excluding self) in tree order matching a predicate
    pub fn find_descendant<F>(&self, pred: F) -> Option<&Node>
    where
        F: Fn(&Node) -> bool + Copy,
    {
        for child in self.children() {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Collect all descendants (excluding self) in tree order matching a predicate
    pub fn descendants_matching<F>(&self, pred: F) -> Vec<&Node>
    where
        F: Fn(&Node) -> bool + Copy,
    {
        let mut found = Vec::new();
        self.collect_matching(pred, &mut found);
        found
    }

    fn collect_matching<'a, F>(&'a self, pred: F, found: &mut Vec<&'a Node>)
    where
        F: Fn(&Node) -> bool + Copy,
    {
        for child in self.children() {
            if pred(child) {
                found.push(child);
            }
            child.collect_matching(pred, found);
        }
    }

    /// Remove every descendant matching a predicate, together with its subtree
    pub fn remove_descendants<F>(&mut self, pred: F)
    where
        F: Fn(&Node) -> bool + Copy,
    {
        if let Some(ref mut children) = self.children {
            children.retain(|child| !pred(child));
            for child in children.iter_mut() {
                child.remove_descendants(pred);
            }
        }
    }

    /// Copy this node without its children
    pub(crate) fn shallow_clone(&self) -> Self {
        Self {
            node_type: self.node_type,
            node_name: self.node_name.clone(),
            node_value: self.node_value.clone(),
            attributes: self.attributes.clone(),
            children: if self.is_element() { Some(Vec::new()) } else { None },
        }
    }
}

/// A reference to a node with parent context.
/// This allows checking the enclosing element without storing parent pointers.
#[derive(Debug, Clone)]
pub struct NodeRef<'a> {
    /// The node itself
    pub node: &'a Node,
    /// Tag name of the enclosing element, lowercase
    parent_tag: Option<&'a str>,
}

impl<'a> NodeRef<'a> {
    /// Create a new NodeRef without parent context
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            parent_tag: None,
        }
    }

    /// Create a new NodeRef with parent tag context
    pub fn with_parent(node: &'a Node, parent_tag: &'a str) -> Self {
        Self {
            node,
            parent_tag: Some(parent_tag),
        }
    }

    /// Get the parent tag name if known
    pub fn parent_tag(&self) -> Option<&str> {
        self.parent_tag
    }

    pub fn tag_name(&self) -> String {
        self.node.tag_name()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.node.attr(name)
    }

    pub fn text_content(&self) -> String {
        self.node.text_content()
    }
}
