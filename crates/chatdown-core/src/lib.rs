//! chatdown-core - transcript model and Markdown serialization
//!
//! This crate provides the in-memory transcript produced by the `chatdown`
//! page classifiers and the serializer that turns it into the exported
//! Markdown document.
//!
//! # Architecture
//!
//! ```text
//! Page tree ──classify──▶ Segments ──assemble──▶ ┌────────────┐
//!                                                │ Transcript │ ──▶ Markdown document
//!                                                └────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use chatdown_core::{serialize, DocumentOptions, RenderedMessage, Role, Transcript};
//!
//! let transcript = Transcript::new(
//!     "My chat",
//!     vec![
//!         RenderedMessage::new(Role::User, "Hello"),
//!         RenderedMessage::new(Role::Assistant, "Hi there!"),
//!     ],
//! );
//!
//! let markdown = serialize(&transcript, "2026-01-01 12:00:00", &DocumentOptions::default());
//! assert!(markdown.starts_with("# My chat"));
//! ```

mod model;
mod options;
mod serialize;

pub use model::{RenderedMessage, Role, Transcript};
pub use options::DocumentOptions;
pub use serialize::serialize;
