//! Inline formatter: text, emphasis, links and inline code.

use crate::node::{Node, NodeRef, NodeType};

/// Render the children of an element as inline Markdown
///
/// Text passes through verbatim; only the final result is trimmed.
pub fn inline_markdown(element: &Node) -> String {
    let mut out = String::new();
    let tag = element.tag_name();
    for child in element.children() {
        push_inline(&NodeRef::with_parent(child, &tag), &mut out);
    }
    out.trim().to_string()
}

fn push_inline(node: &NodeRef, out: &mut String) {
    match node.node.node_type {
        NodeType::Text => out.push_str(node.node.node_value.as_deref().unwrap_or("")),
        NodeType::Comment => {}
        NodeType::Element => {
            let tag = node.tag_name();
            match tag.as_str() {
                "strong" | "b" => wrap(&node.text_content(), "**", out),
                "em" | "i" => wrap(&node.text_content(), "*", out),
                "code" => {
                    let text = node.text_content();
                    // code inside a preformatted block is not inline code
                    if node.parent_tag() == Some("pre") {
                        out.push_str(&text);
                    } else {
                        wrap(&text, "`", out);
                    }
                }
                "a" => {
                    let text = node.text_content();
                    match link_target(node.attr("href")) {
                        Some(href) => {
                            out.push('[');
                            out.push_str(&text);
                            out.push_str("](");
                            out.push_str(href);
                            out.push(')');
                        }
                        None => out.push_str(&text),
                    }
                }
                _ => {
                    for child in node.node.children() {
                        push_inline(&NodeRef::with_parent(child, &tag), out);
                    }
                }
            }
        }
    }
}

fn wrap(text: &str, delimiter: &str, out: &mut String) {
    if text.trim().is_empty() {
        out.push_str(text);
        return;
    }
    out.push_str(delimiter);
    out.push_str(text);
    out.push_str(delimiter);
}

/// Usable link target, if any
fn link_target(href: Option<&str>) -> Option<&str> {
    let href = href?.trim();
    if href.is_empty() || href.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }
    Some(href)
}
