//! HTML parsing support.
//!
//! This module parses saved page HTML and converts it to the CDP-style Node
//! structure a [`crate::Page`] indexes.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse a complete HTML document into a Node tree rooted at `<html>`.
///
/// Text is kept verbatim (whitespace included). Comments become comment
/// nodes that every text and Markdown rendering skips.
///
/// # Example
///
/// ```rust
/// use chatdown::parse_document;
///
/// let node = parse_document("<title>Chat</title><p>Hello <em>World</em></p>");
/// assert_eq!(node.tag_name(), "html");
/// assert_eq!(node.text_content(), "ChatHello World");
/// ```
pub fn parse_document(html: &str) -> Node {
    let document = Html::parse_document(html);
    scraper_to_node(document.root_element())
}

/// Parse an HTML fragment; the result is rooted at a synthetic `<html>` element.
pub fn parse_fragment(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();

    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(tag)
    } else {
        Node::element_with_attrs(tag, attrs)
    };

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}
