//! Markdown formatters for page subtrees.
//!
//! All formatters work on detached [`Node`](crate::Node) copies:
//!
//! - [`inline_markdown`] renders a run of inline nodes
//! - [`list_markdown`] / [`blockquote_markdown`] render block structures on top of it
//! - [`plain_markdown`] is the plain paragraph/line-break fallback used for user turns
//! - [`structured_markdown`] is the order-preserving renderer used for assistant turns

mod block;
mod inline;
mod structured;

pub use block::{blockquote_markdown, list_markdown, plain_markdown};
pub use inline::inline_markdown;
pub use structured::structured_markdown;
