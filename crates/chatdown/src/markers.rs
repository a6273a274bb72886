//! Named marker predicates for the page's structural conventions.
//!
//! Every structural heuristic the classifiers and renderers use goes through
//! a [`Marker`] stored in the [`Markers`] table, so a change in the page
//! markup only needs a different table.

use crate::node::Node;

/// Type alias for predicate markers
pub type PredicateFn = Box<dyn Fn(&Node) -> bool + Send + Sync>;

/// A marker decides whether a single element carries a convention
pub enum Marker {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match an attribute with an exact value
    Attr { name: String, value: String },
    /// Match elements carrying every one of these class tokens
    Classes(Vec<String>),
    /// Match a substring of the raw class attribute
    ClassContains(String),
    /// Match when every inner marker matches
    All(Vec<Marker>),
    /// Match when any inner marker matches
    Any(Vec<Marker>),
    /// Match using a predicate function
    Predicate(PredicateFn),
}

impl Marker {
    /// Create a marker for a single tag
    pub fn tag(name: &str) -> Self {
        Marker::TagName(name.to_lowercase())
    }

    /// Create a marker for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Marker::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    /// Create a marker for `[name="value"]`
    pub fn attr(name: &str, value: &str) -> Self {
        Marker::Attr {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a marker for a single class token
    pub fn class(name: &str) -> Self {
        Marker::Classes(vec![name.to_string()])
    }

    /// Create a marker requiring all class tokens
    pub fn classes(names: &[&str]) -> Self {
        Marker::Classes(names.iter().map(|s| s.to_string()).collect())
    }

    /// Create a marker for a class attribute substring
    pub fn class_contains(needle: &str) -> Self {
        Marker::ClassContains(needle.to_string())
    }

    /// Create a `tag.class1.class2` marker
    pub fn tag_with_classes(tag: &str, classes: &[&str]) -> Self {
        Marker::All(vec![Marker::tag(tag), Marker::classes(classes)])
    }

    /// Create a marker with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Node) -> bool + Send + Sync + 'static,
    {
        Marker::Predicate(Box::new(f))
    }

    /// Check if this marker matches a node; non-elements never match
    pub fn matches(&self, node: &Node) -> bool {
        if !node.is_element() {
            return false;
        }

        match self {
            Marker::TagName(t) => node.is_tag(t),
            Marker::TagNames(tags) => tags.iter().any(|t| node.is_tag(t)),
            Marker::Attr { name, value } => node.attr(name) == Some(value.as_str()),
            Marker::Classes(classes) => classes.iter().all(|c| node.has_class(c)),
            Marker::ClassContains(needle) => node.class_contains(needle),
            Marker::All(markers) => markers.iter().all(|m| m.matches(node)),
            Marker::Any(markers) => markers.iter().any(|m| m.matches(node)),
            Marker::Predicate(f) => f(node),
        }
    }
}

/// The table of page conventions
pub struct Markers {
    /// A user turn
    pub user_message: Marker,
    /// The markdown body of an assistant turn
    pub assistant_markdown: Marker,
    /// Plain response text inside a thinking block
    pub response_body: Marker,
    /// Interactive buttons scanned for tool and thinking labels
    pub button: Marker,
    /// Tool block containers, tried nearest-first in priority order
    pub tool_containers: Vec<Marker>,
    /// Collapsed thinking row button
    pub row_button: Marker,
    /// Summary text inside a collapsed thinking row button
    pub summary_span: Marker,
    /// Container of a thinking block
    pub rounded_container: Marker,
    /// Transition wrapper a thinking container must also match
    pub transition_container: Marker,
    /// Wrapper around a copyable code block
    pub copyable_code_block: Marker,
    /// Preformatted element inside a copyable code block
    pub code_block_pre: Marker,
    /// UI chrome skipped by assistant rendering
    pub ui_chrome: Marker,
    /// UI elements pruned from user messages
    pub ui_element: Marker,
    /// Media and code pruned from user messages
    pub user_media: Marker,
    /// Elements dropped before reading a thinking block's own text
    pub thinking_noise: Marker,
    /// Images considered for upload extraction
    pub image: Marker,
    /// Inline code elements
    pub code: Marker,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            user_message: Marker::attr("data-testid", "user-message"),
            assistant_markdown: Marker::class("standard-markdown"),
            response_body: Marker::class("font-claude-response-body"),
            button: Marker::tag("button"),
            tool_containers: vec![
                Marker::tag_with_classes("div", &["w-full", "flex", "flex-col"]),
                Marker::tag_with_classes("div", &["w-full"]),
            ],
            row_button: Marker::class_contains("group/row"),
            summary_span: Marker::tag_with_classes("span", &["text-text-300"]),
            rounded_container: Marker::tag_with_classes("div", &["rounded-lg"]),
            transition_container: Marker::class_contains("ease-out"),
            copyable_code_block: Marker::classes(&["relative", "group/copy"]),
            code_block_pre: Marker::tag_with_classes("pre", &["code-block__code"]),
            ui_chrome: Marker::Any(vec![
                Marker::class("copy-button"),
                Marker::class("toolbar"),
                Marker::class("actions"),
            ]),
            ui_element: Marker::Any(vec![
                Marker::tags(&["button", "svg"]),
                Marker::attr("role", "button"),
                Marker::class_contains("edit"),
                Marker::class_contains("copy"),
                Marker::class_contains("toolbar"),
                Marker::class_contains("actions"),
                Marker::class_contains("hover"),
                Marker::class_contains("tooltip"),
            ]),
            user_media: Marker::tags(&["img", "picture", "pre"]),
            thinking_noise: Marker::tags(&["button", "code", "pre"]),
            image: Marker::tag("img"),
            code: Marker::tag("code"),
        }
    }
}
