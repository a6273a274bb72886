//! ExportService - the main entry point for exporting a page.

use std::fmt;

use chatdown_core::{serialize, Transcript};
use tracing::{debug, info, warn};

use crate::assemble::assemble;
use crate::classify::classify;
use crate::markers::Markers;
use crate::options::ExportOptions;
use crate::page::Page;
use crate::save::SaveTarget;
use crate::{ChatdownError, Result};

/// Characters not allowed in exported file names
const FORBIDDEN_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Outcome of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub filename: String,
    pub messages: usize,
    pub images: usize,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} messages", self.filename, self.messages)?;
        if self.images > 0 {
            write!(f, ", {} images noted", self.images)?;
        }
        f.write_str(")")
    }
}

/// The service exporting transcripts from pages
pub struct ExportService {
    options: ExportOptions,
    markers: Markers,
}

impl ExportService {
    /// Create a new ExportService with default options and markers
    pub fn new() -> Self {
        Self {
            options: ExportOptions::default(),
            markers: Markers::default(),
        }
    }

    /// Create an ExportService with custom options
    pub fn with_options(options: ExportOptions) -> Self {
        Self {
            options,
            markers: Markers::default(),
        }
    }

    /// Get the current options
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ExportOptions {
        &mut self.options
    }

    /// Get mutable access to the marker table
    pub fn markers_mut(&mut self) -> &mut Markers {
        &mut self.markers
    }

    /// Sanitized title of a page
    pub fn title(&self, page: &Page) -> String {
        let raw = self
            .options
            .title_override
            .clone()
            .or_else(|| page.title())
            .map(|t| t.replacen(self.options.title_suffix.as_str(), "", 1).trim().to_string())
            .filter(|t| !t.is_empty());
        sanitize_title(
            raw.as_deref().unwrap_or(&self.options.default_title),
            self.options.max_title_chars,
            &self.options.default_title,
        )
    }

    /// Classify and assemble the page's transcript
    pub fn transcript(&self, page: &Page) -> Transcript {
        let candidates = classify(page, &self.markers, &self.options);
        let transcript = assemble(page, candidates, &self.title(page), &self.markers, &self.options);
        info!(messages = transcript.len(), "collected transcript");
        transcript
    }

    /// Render the Markdown document for a page
    ///
    /// Fails with [`ChatdownError::NoMessages`] when the page has no segments.
    pub fn render(&self, page: &Page, exported_at: &str) -> Result<(Transcript, String)> {
        let transcript = self.transcript(page);
        if transcript.is_empty() {
            warn!("no messages found on page");
            return Err(ChatdownError::NoMessages);
        }
        let markdown = serialize(&transcript, exported_at, &self.options.document);
        Ok((transcript, markdown))
    }

    /// Export a page, stamped with the current local time
    pub fn export<S>(&self, page: &Page, target: &S) -> Result<ExportSummary>
    where
        S: SaveTarget + ?Sized,
    {
        let exported_at = chrono::Local::now()
            .format(&self.options.timestamp_format)
            .to_string();
        self.export_at(page, target, &exported_at)
    }

    /// Export a page with an explicit timestamp
    pub fn export_at<S>(&self, page: &Page, target: &S, exported_at: &str) -> Result<ExportSummary>
    where
        S: SaveTarget + ?Sized,
    {
        let (transcript, markdown) = self.render(page, exported_at)?;
        let filename = session_filename(&transcript.title);

        debug!(filename = %filename, bytes = markdown.len(), "handing export to save target");
        target.save(markdown.as_bytes(), &filename).map_err(|e| {
            warn!(error = %e, "save failed");
            ChatdownError::Save(e)
        })?;

        Ok(ExportSummary {
            filename,
            messages: transcript.len(),
            images: transcript.image_count(),
        })
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

/// Make a title safe for use as a file name
///
/// Forbidden characters become `-`, the result is cut to `max_chars`
/// characters and trimmed; an empty result falls back to `fallback`.
pub fn sanitize_title(title: &str, max_chars: usize, fallback: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if FORBIDDEN_FILENAME_CHARS.contains(&c) { '-' } else { c })
        .take(max_chars)
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// File name of an exported session
pub fn session_filename(title: &str) -> String {
    format!("{}_session.md", title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("a/b:c*d", 100, "x"), "a-b-c-d");
        assert_eq!(session_filename(&sanitize_title("a/b:c*d", 100, "x")), "a-b-c-d_session.md");
        assert_eq!(sanitize_title(r#"<q>"|?\"#, 100, "x"), "-q-----");
    }

    #[test]
    fn test_sanitize_truncates_chars() {
        let long = "あ".repeat(150);
        assert_eq!(sanitize_title(&long, 100, "x").chars().count(), 100);
        assert_eq!(sanitize_title("abc   def", 5, "x"), "abc");
    }

    #[test]
    fn test_sanitize_fallback() {
        assert_eq!(sanitize_title("   ", 100, "claude-session"), "claude-session");
        assert_eq!(sanitize_title("", 100, "claude-session"), "claude-session");
    }

    #[test]
    fn test_summary_display() {
        let summary = ExportSummary {
            filename: "a_session.md".to_string(),
            messages: 4,
            images: 0,
        };
        assert_eq!(summary.to_string(), "a_session.md (4 messages)");

        let summary = ExportSummary { images: 2, ..summary };
        assert_eq!(summary.to_string(), "a_session.md (4 messages, 2 images noted)");
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_title_from_page() {
        let service = ExportService::new();
        let page = Page::parse("<title>Rust help - Claude</title>");
        assert_eq!(service.title(&page), "Rust help");

        let page = Page::parse("<title> - Claude</title>");
        assert_eq!(service.title(&page), "claude-session");

        let page = Page::parse("<p>untitled</p>");
        assert_eq!(service.title(&page), "claude-session");
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_title_override() {
        let mut service = ExportService::new();
        service.options_mut().title_override = Some("Notes: week 1".to_string());
        let page = Page::parse("<title>Ignored - Claude</title>");
        assert_eq!(service.title(&page), "Notes- week 1");
    }
}
