//! Transcript model
//!
//! The document a page export produces before it is serialized: an ordered
//! list of role-labeled Markdown messages plus the page title.

use std::fmt;

/// Who (or what) produced a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// A user turn
    User,

    /// An assistant answer
    Assistant,

    /// A tool call block, carrying the tool name shown on its button
    Tool(String),

    /// A reasoning block shown separately from the answer
    AssistantThinking,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("User"),
            Role::Assistant => f.write_str("Assistant"),
            Role::Tool(name) => write!(f, "Tool: {}", name),
            Role::AssistantThinking => f.write_str("Assistant Thinking"),
        }
    }
}

/// A single rendered transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub role: Role,

    /// Markdown body, already trimmed
    pub content: String,

    /// Uploaded image URLs referenced by the message
    pub images: Vec<String>,
}

impl RenderedMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            images: Vec::new(),
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

/// The ordered transcript of one page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    pub title: String,
    pub messages: Vec<RenderedMessage>,
}

impl Transcript {
    pub fn new(title: impl Into<String>, messages: Vec<RenderedMessage>) -> Self {
        Self {
            title: title.into(),
            messages,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total number of image URLs across all messages
    pub fn image_count(&self) -> usize {
        self.messages.iter().map(|m| m.images.len()).sum()
    }
}
