//! Structured rendering for assistant turns.
//!
//! A single recursive-descent visitor: each child is classified into a
//! [`BlockKind`] and rendered (or descended into) accordingly, so document
//! order is preserved across paragraphs, lists, quotes and code blocks.

use super::block::{blockquote_markdown, list_markdown};
use super::inline::inline_markdown;
use crate::markers::Markers;
use crate::node::{Node, NodeType};

/// How a child node takes part in structured rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Text,
    CodeBlock,
    /// Descend into the children without wrapping
    Flatten,
    Chrome,
    Paragraph,
    List { ordered: bool },
    Blockquote,
    Inline,
    Ignored,
}

fn block_kind(node: &Node, markers: &Markers) -> BlockKind {
    match node.node_type {
        NodeType::Text => return BlockKind::Text,
        NodeType::Comment => return BlockKind::Ignored,
        NodeType::Element => {}
    }

    if markers.copyable_code_block.matches(node) {
        return BlockKind::CodeBlock;
    }
    if node.find_descendant(|d| markers.code_block_pre.matches(d)).is_some() {
        return BlockKind::Flatten;
    }
    if markers.ui_chrome.matches(node) {
        return BlockKind::Chrome;
    }

    match node.tag_name().as_str() {
        "p" => BlockKind::Paragraph,
        "ul" => BlockKind::List { ordered: false },
        "ol" => BlockKind::List { ordered: true },
        "blockquote" => BlockKind::Blockquote,
        "div" => BlockKind::Flatten,
        _ => BlockKind::Inline,
    }
}

/// Render an element's children as Markdown, preserving order
pub fn structured_markdown(element: &Node, markers: &Markers) -> String {
    let mut out = String::new();
    visit_children(element, markers, &mut out);
    out.trim().to_string()
}

fn visit_children(parent: &Node, markers: &Markers, out: &mut String) {
    for child in parent.children() {
        match block_kind(child, markers) {
            BlockKind::Text => {
                out.push_str(child.node_value.as_deref().unwrap_or("").trim());
            }
            BlockKind::CodeBlock => {
                if let Some(fence) = code_fence(child, markers) {
                    out.push_str(&fence);
                }
            }
            BlockKind::Flatten => visit_children(child, markers, out),
            BlockKind::Chrome | BlockKind::Ignored => {}
            BlockKind::Paragraph => push_block(out, inline_markdown(child), "\n\n"),
            BlockKind::List { ordered } => push_block(out, list_markdown(child, ordered), "\n"),
            BlockKind::Blockquote => push_block(out, blockquote_markdown(child), "\n\n"),
            BlockKind::Inline => push_block(out, inline_markdown(child), ""),
        }
    }
}

fn push_block(out: &mut String, content: String, suffix: &str) {
    if content.is_empty() {
        return;
    }
    out.push_str(&content);
    out.push_str(suffix);
}

/// Fenced block for a copyable code block wrapper
fn code_fence(wrapper: &Node, markers: &Markers) -> Option<String> {
    let pre = wrapper.find_descendant(|d| markers.code_block_pre.matches(d))?;
    let code = pre.text_content();
    let code = code.trim();
    if code.is_empty() {
        return None;
    }

    let language = pre
        .find_descendant(|d| markers.code.matches(d))
        .and_then(|c| {
            c.classes()
                .find_map(|class| class.strip_prefix("language-"))
                .map(|lang| lang.to_string())
        })
        .unwrap_or_default();

    Some(format!("\n\n```{}\n{}\n```\n\n", language, code))
}
