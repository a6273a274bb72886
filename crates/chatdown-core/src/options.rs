//! Configuration options for transcript serialization

/// Options for the exported Markdown document
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Separator written after the header and after every message
    pub hr: String,

    /// Label of the italic export-timestamp line
    pub exported_label: String,

    /// Wording after the image count in the italic image note
    pub image_note: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            hr: "---".to_string(),
            exported_label: "Exported".to_string(),
            image_note: "images attached".to_string(),
        }
    }
}
