//! Transcript serialization
//!
//! Converts a [`Transcript`] into the exported Markdown document.

use crate::model::{RenderedMessage, Transcript};
use crate::options::DocumentOptions;

/// Serialize a transcript to a Markdown document
///
/// Layout: `# {title}`, the italic export line, a separator, then for each
/// message `## {role}`, the body (if any), an image note (if any) and a
/// separator.
pub fn serialize(transcript: &Transcript, exported_at: &str, options: &DocumentOptions) -> String {
    let body_len: usize = transcript.messages.iter().map(|m| m.content.len() + 32).sum();
    let mut output = String::with_capacity(body_len + 128);

    output.push_str("# ");
    output.push_str(&transcript.title);
    output.push_str("\n\n");

    output.push('*');
    output.push_str(&options.exported_label);
    output.push_str(": ");
    output.push_str(exported_at);
    output.push_str("*\n\n");

    push_hr(options, &mut output);

    for message in &transcript.messages {
        serialize_message(message, options, &mut output);
    }

    output
}

fn serialize_message(message: &RenderedMessage, options: &DocumentOptions, out: &mut String) {
    out.push_str("## ");
    out.push_str(&message.role.to_string());
    out.push_str("\n\n");

    if !message.content.is_empty() {
        out.push_str(&message.content);
        out.push_str("\n\n");
    }

    if !message.images.is_empty() {
        out.push_str("*[");
        out.push_str(&message.images.len().to_string());
        out.push(' ');
        out.push_str(&options.image_note);
        out.push_str("]*\n\n");
    }

    push_hr(options, out);
}

fn push_hr(options: &DocumentOptions, out: &mut String) {
    out.push_str(&options.hr);
    out.push_str("\n\n");
}
