//! Block formatters: lists, blockquotes and the plain fallback.

use once_cell::sync::Lazy;
use regex::Regex;

use super::inline::inline_markdown;
use crate::node::{Node, NodeType};

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").expect("valid regex"));
static TRAILING_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m) +$").expect("valid regex"));

/// Render the direct `<li>` children of a list, one per line
pub fn list_markdown(list: &Node, ordered: bool) -> String {
    let mut out = String::new();

    for (i, item) in list.element_children().filter(|c| c.is_tag("li")).enumerate() {
        if ordered {
            out.push_str(&(i + 1).to_string());
            out.push_str(". ");
        } else {
            out.push_str("* ");
        }
        out.push_str(&inline_markdown(item));
        out.push('\n');
    }

    out
}

/// Render a blockquote, prefixing every line with `> `
pub fn blockquote_markdown(quote: &Node) -> String {
    inline_markdown(quote)
        .split('\n')
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain block rendering: paragraphs and divs become blank-line separated
/// blocks, `<br>` becomes a newline, everything else passes its content through
pub fn plain_markdown(element: &Node) -> String {
    let mut out = String::new();
    for child in element.children() {
        out.push_str(&plain_node(child));
    }

    let collapsed = EXCESS_NEWLINES.replace_all(&out, "\n\n\n");
    TRAILING_SPACES.replace_all(&collapsed, "").trim().to_string()
}

fn plain_node(node: &Node) -> String {
    match node.node_type {
        NodeType::Text => node.node_value.clone().unwrap_or_default(),
        NodeType::Comment => String::new(),
        NodeType::Element => {
            let content: String = node.children().map(plain_node).collect();
            match node.tag_name().as_str() {
                "p" | "div" => {
                    if content.trim().is_empty() {
                        String::new()
                    } else {
                        content + "\n\n"
                    }
                }
                "br" => "\n".to_string(),
                _ => content,
            }
        }
    }
}
