//! Document assembler.
//!
//! Orders classified segments by their position in the page and renders
//! each one into a role-labeled [`RenderedMessage`].

use chatdown_core::{RenderedMessage, Role, Transcript};

use crate::classify::{Candidates, Segment, SegmentKind};
use crate::format::{plain_markdown, structured_markdown};
use crate::markers::Markers;
use crate::options::ExportOptions;
use crate::page::{NodeId, Page};

/// Order all candidates by document position and render them
pub fn assemble(
    page: &Page,
    candidates: Candidates,
    title: &str,
    markers: &Markers,
    options: &ExportOptions,
) -> Transcript {
    let mut segments = candidates.into_segments();

    // stable: segments comparing equal keep their input order
    segments.sort_by(|a, b| page.compare_document_position(a.anchor, b.anchor));

    let messages = segments
        .into_iter()
        .map(|segment| render_segment(page, segment, markers, options))
        .collect();

    Transcript::new(title, messages)
}

/// Render one segment
pub fn render_segment(page: &Page, segment: Segment, markers: &Markers, options: &ExportOptions) -> RenderedMessage {
    match segment.kind {
        SegmentKind::User => {
            RenderedMessage::new(Role::User, render_user(page, segment.anchor, markers)).with_images(segment.images)
        }
        SegmentKind::Assistant => {
            let content = structured_markdown(&page.detach(segment.anchor), markers);
            RenderedMessage::new(Role::Assistant, content).with_images(segment.images)
        }
        SegmentKind::Tool(name) => {
            RenderedMessage::new(Role::Tool(name), render_tool(page, segment.anchor, markers, options))
        }
        SegmentKind::Thinking => RenderedMessage::new(
            Role::AssistantThinking,
            render_thinking(page, segment.anchor, markers, options),
        ),
    }
}

/// User turns: UI elements, media and code blocks pruned from a copy, then
/// rendered with the plain fallback
fn render_user(page: &Page, anchor: NodeId, markers: &Markers) -> String {
    let mut copy = page.detach(anchor);
    copy.remove_descendants(|n| markers.ui_element.matches(n));
    copy.remove_descendants(|n| markers.user_media.matches(n));
    plain_markdown(&copy)
}

/// Tool blocks: each non-empty code element as a fenced block, alternately
/// labeled request and response by position
fn render_tool(page: &Page, anchor: NodeId, markers: &Markers, options: &ExportOptions) -> String {
    page.select_within(anchor, &markers.code)
        .into_iter()
        .enumerate()
        .filter_map(|(index, code)| {
            let text = page.text_content(code);
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            let label = if index % 2 == 0 {
                &options.request_label
            } else {
                &options.response_label
            };
            Some(format!("**{}:**\n\n```\n{}\n```", label, text))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Thinking blocks: the nested assistant body if there is one, else the
/// response body texts, else the block's own text without its labels
fn render_thinking(page: &Page, anchor: NodeId, markers: &Markers, options: &ExportOptions) -> String {
    if let Some(body) = page.find_within(anchor, &markers.assistant_markdown) {
        return structured_markdown(&page.detach(body), markers);
    }

    let responses = page.select_within(anchor, &markers.response_body);
    if !responses.is_empty() {
        return responses
            .into_iter()
            .map(|id| page.text_content(id).trim().to_string())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    let mut copy = page.detach(anchor);
    copy.remove_descendants(|n| markers.thinking_noise.matches(n));
    strip_thinking_labels(&copy.text_content(), options)
}

fn strip_thinking_labels(text: &str, options: &ExportOptions) -> String {
    let mut text = text.trim();

    if let Some(rest) = options
        .thinking_labels
        .iter()
        .find_map(|label| text.strip_prefix(label.as_str()))
    {
        text = rest;
    }

    if options
        .considering_prefixes
        .iter()
        .any(|prefix| text.starts_with(prefix.as_str()))
    {
        if let Some((_, rest)) = text.split_once('\n') {
            text = rest;
        }
    }

    let mut text = text.trim();
    if let Some(cut) = options
        .exchange_labels
        .iter()
        .filter_map(|label| text.find(label.as_str()))
        .min()
    {
        text = text[..cut].trim();
    }

    text.to_string()
}

#[cfg(all(test, feature = "html"))]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn transcript(html: &str) -> Transcript {
        let page = Page::parse(html);
        let markers = Markers::default();
        let options = ExportOptions::default();
        let candidates = classify(&page, &markers, &options);
        assemble(&page, candidates, "Test", &markers, &options)
    }

    fn roles(t: &Transcript) -> Vec<String> {
        t.messages.iter().map(|m| m.role.to_string()).collect()
    }

    #[test]
    fn test_interleaved_order() {
        let t = transcript(
            r#"<div data-testid="user-message"><p>Q1</p></div>
               <div class="standard-markdown"><p>A1</p></div>
               <div data-testid="user-message"><p>Q2</p></div>
               <div class="standard-markdown"><p>A2</p></div>"#,
        );
        assert_eq!(roles(&t), vec!["User", "Assistant", "User", "Assistant"]);
        let contents: Vec<_> = t.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["Q1", "A1", "Q2", "A2"]);
    }

    #[test]
    fn test_all_kinds_in_document_order() {
        let t = transcript(
            r#"<div data-testid="user-message"><p>Find it</p></div>
               <div class="rounded-lg ease-out"><button>思考プロセス</button><div class="standard-markdown"><p>Let me search.</p></div></div>
               <div class="w-full flex flex-col"><button>web_search</button><code>rust</code><code>results</code></div>
               <div class="standard-markdown"><p>Found it.</p></div>"#,
        );
        assert_eq!(roles(&t), vec!["User", "Assistant Thinking", "Tool: web_search", "Assistant"]);
        assert_eq!(t.messages[1].content, "Let me search.");
        assert_eq!(t.title, "Test");
    }

    #[test]
    fn test_user_message_pruning() {
        let t = transcript(
            concat!(
                r#"<div data-testid="user-message"><p>Hello   </p>"#,
                r#"<img src="https://claude.ai/api/o/files/9/thumbnail"><pre>secret code</pre>"#,
                r#"<div class="edit-controls"><span>Edit</span></div><button>Retry</button>"#,
                r#"<p>Line<br>break</p></div>"#,
            ),
        );
        let user = &t.messages[0];
        assert_eq!(user.content, "Hello\n\nLine\nbreak");
        assert_eq!(user.images.len(), 1);
    }

    #[test]
    fn test_tool_content() {
        let t = transcript(
            r#"<div class="w-full"><button>web_fetch</button><code>REQ</code><code>RESP</code></div>"#,
        );
        let content = &t.messages[0].content;
        assert_eq!(
            content,
            "**Request:**\n\n```\nREQ\n```\n\n**Response:**\n\n```\nRESP\n```"
        );
        assert!(content.find("REQ").unwrap() < content.find("RESP").unwrap());
        assert!(t.messages[0].images.is_empty());
    }

    #[test]
    fn test_tool_labels_alternate() {
        let t = transcript(
            r#"<div class="w-full"><button>web_fetch</button><code>a</code><code>b</code><code>c</code></div>"#,
        );
        let content = &t.messages[0].content;
        assert_eq!(content.matches("**Request:**").count(), 2);
        assert_eq!(content.matches("**Response:**").count(), 1);
    }

    #[test]
    fn test_thinking_response_bodies() {
        let t = transcript(
            r#"<div class="rounded-lg ease-out"><button>思考プロセス</button>
               <div class="font-claude-response-body"> first </div>
               <div class="font-claude-response-body"></div>
               <div class="font-claude-response-body">second</div></div>"#,
        );
        assert_eq!(t.messages[0].content, "first\n\nsecond");
    }

    #[test]
    fn test_thinking_fallback_text() {
        let t = transcript(
            "<div class=\"rounded-lg ease-out\"><button>じっくり考えています</button><div>じっくり考えています\nThe actual reasoning. リクエスト <code>x</code> trailing</div></div>",
        );
        assert_eq!(t.messages[0].role, Role::AssistantThinking);
        assert_eq!(t.messages[0].content, "The actual reasoning.");
    }

    #[test]
    fn test_thinking_fallback_keeps_prose() {
        let t = transcript(
            r#"<div class="rounded-lg ease-out"><button>思考プロセス</button><div>Considering the cache first.
The user asked about HTTP Request headers and caching.</div></div>"#,
        );
        assert_eq!(
            t.messages[0].content,
            "Considering the cache first.\nThe user asked about HTTP Request headers and caching."
        );
    }

    #[test]
    fn test_strip_thinking_labels() {
        let options = ExportOptions::default();
        assert_eq!(strip_thinking_labels("思考プロセス  idea", &options), "idea");
        assert_eq!(strip_thinking_labels("じっくり考え中\nbody\nリクエスト: x", &options), "body");
        assert_eq!(strip_thinking_labels("plain", &options), "plain");
    }

    #[test]
    fn test_idempotent() {
        let html = r#"<div data-testid="user-message"><p>Q</p></div><div class="standard-markdown"><ul><li>a</li></ul></div>"#;
        assert_eq!(transcript(html), transcript(html));
    }
}
