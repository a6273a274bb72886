//! # chatdown
//!
//! Export chat transcripts rendered as HTML pages to Markdown.
//!
//! ## Design
//!
//! A page is read once into an immutable [`Page`] snapshot. Four classifiers
//! locate user turns, assistant turns, tool-call blocks and thinking blocks
//! through a table of named [`Markers`]; the assembler orders the segments by
//! tree position and renders each to Markdown; the [`ExportService`] writes
//! the resulting document to a [`SaveTarget`].
//!
//! Renderers only ever see detached copies of page subtrees, so pruning UI
//! chrome never changes the page.
//!
//! ## Example
//!
//! ```rust
//! use chatdown::{ExportService, Page, SaveError};
//!
//! let page = Page::parse(
//!     r#"<title>Greeting - Claude</title>
//!        <div data-testid="user-message"><p>Hi!</p></div>
//!        <div class="standard-markdown"><p>Hello <strong>there</strong>.</p></div>"#,
//! );
//!
//! let service = ExportService::new();
//! let save = |bytes: &[u8], name: &str| -> Result<(), SaveError> {
//!     assert_eq!(name, "Greeting_session.md");
//!     assert!(String::from_utf8_lossy(bytes).contains("Hello **there**."));
//!     Ok(())
//! };
//!
//! let summary = service.export(&page, &save).unwrap();
//! assert_eq!(summary.to_string(), "Greeting_session.md (2 messages)");
//! ```

mod assemble;
mod classify;
mod export;
pub mod format;
#[cfg(feature = "html")]
pub mod html;
pub mod markers;
pub mod node;
mod options;
pub mod page;
mod save;

pub use assemble::{assemble, render_segment};
pub use chatdown_core::{DocumentOptions, RenderedMessage, Role, Transcript};
pub use classify::{classify, extract_images, Candidates, Segment, SegmentKind};
pub use export::{sanitize_title, session_filename, ExportService, ExportSummary};
#[cfg(feature = "html")]
pub use html::{parse_document, parse_fragment};
pub use markers::{Marker, Markers};
pub use node::{Node, NodeRef, NodeType};
pub use options::ExportOptions;
pub use page::{NodeId, Page};
pub use save::{DirectorySaver, SaveError, SaveTarget};

/// Error type for chatdown operations
#[derive(Debug, thiserror::Error)]
pub enum ChatdownError {
    #[error("No messages found. Please make sure you are on a Claude.ai conversation page.")]
    NoMessages,

    #[error(transparent)]
    Save(#[from] SaveError),
}

pub type Result<T> = std::result::Result<T, ChatdownError>;
