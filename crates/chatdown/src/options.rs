//! Textual heuristics and export settings.

use chatdown_core::DocumentOptions;
use once_cell::sync::Lazy;
use regex::Regex;

/// Button labels that look like tool names
static TOOL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z_]+:[a-z_]+$|^ask_|^web_search|^web_fetch|_search$|_fetch$")
        .expect("tool pattern is valid")
});

/// Options for classification, rendering and export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pattern a button's trimmed text must match to name a tool
    pub tool_pattern: Regex,

    /// Button texts containing any of these are never tools
    pub tool_exclusions: Vec<String>,

    /// Exact button texts of an expanded thinking block
    pub thinking_labels: Vec<String>,

    /// Leading button texts of a thinking block still in progress
    pub considering_prefixes: Vec<String>,

    /// Labels after which a thinking block's own text is discarded
    pub exchange_labels: Vec<String>,

    /// Label for even-positioned code in a tool block
    pub request_label: String,

    /// Label for odd-positioned code in a tool block
    pub response_label: String,

    /// Substrings an image URL must all contain to count as an upload
    pub image_path_segments: Vec<String>,

    /// Title used instead of the page's own title
    pub title_override: Option<String>,

    /// Suffix removed from the page title
    pub title_suffix: String,

    /// Title used when the page title is missing or sanitizes to nothing
    pub default_title: String,

    /// Maximum title length in characters
    pub max_title_chars: usize,

    /// strftime format of the export timestamp (local time)
    pub timestamp_format: String,

    /// Document layout
    pub document: DocumentOptions,
}

impl ExportOptions {
    /// Check if a trimmed button text names a tool
    pub fn is_tool_name(&self, text: &str) -> bool {
        self.tool_pattern.is_match(text)
            && !self.tool_exclusions.iter().any(|e| text.contains(e.as_str()))
    }

    /// Check if a trimmed button text opens a thinking block
    pub fn is_thinking_label(&self, text: &str) -> bool {
        self.thinking_labels.iter().any(|l| text == l)
            || self.considering_prefixes.iter().any(|p| text.starts_with(p.as_str()))
    }

    /// Check if an image URL points at an uploaded file
    pub fn is_uploaded_image(&self, url: &str) -> bool {
        !url.is_empty() && self.image_path_segments.iter().all(|s| url.contains(s.as_str()))
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            tool_pattern: TOOL_PATTERN.clone(),
            tool_exclusions: vec!["Geminiの意見".to_string()],
            thinking_labels: vec!["思考プロセス".to_string(), "Thinking process".to_string()],
            considering_prefixes: vec!["じっくり考え".to_string()],
            exchange_labels: vec!["リクエスト".to_string()],
            request_label: "Request".to_string(),
            response_label: "Response".to_string(),
            image_path_segments: vec!["/api/".to_string(), "/files/".to_string()],
            title_override: None,
            title_suffix: "- Claude".to_string(),
            default_title: "claude-session".to_string(),
            max_title_chars: 100,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            document: DocumentOptions::default(),
        }
    }
}
