//! End-to-end exports of synthetic chat pages.

use std::cell::RefCell;

use chatdown::{ChatdownError, ExportService, Page, SaveError, SaveTarget};

/// Save target that records every request
#[derive(Default)]
struct Recorder {
    saved: RefCell<Vec<(String, String)>>,
    fail_with: Option<String>,
}

impl SaveTarget for Recorder {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError> {
        if let Some(reason) = &self.fail_with {
            return Err(SaveError::new(reason.clone()));
        }
        self.saved
            .borrow_mut()
            .push((filename.to_string(), String::from_utf8(bytes.to_vec()).unwrap()));
        Ok(())
    }
}

const CONVERSATION: &str = concat!(
    "<html><head><title>Parsing a/b:c*d - Claude</title></head><body>",
    r#"<div data-testid="user-message"><p>How do I parse <em>this</em>?</p>"#,
    r#"<img src="https://claude.ai/api/org/files/abc/preview"><img src="/avatar.png"></div>"#,
    r#"<div class="rounded-lg transition ease-out"><button class="group/row"><span class="text-text-300">Planning</span></button>"#,
    r#"<div class="standard-markdown"><p>Consider a regex.</p></div></div>"#,
    r#"<div class="w-full flex flex-col"><button>web_search</button><code>rust parser</code><code>3 results</code></div>"#,
    r#"<div class="standard-markdown"><p>Use <strong>nom</strong>:</p>"#,
    r#"<div class="relative group/copy"><div class="toolbar"><button>Copy</button></div>"#,
    r#"<pre class="code-block__code"><code class="language-rust">let x = 1;</code></pre></div>"#,
    r#"<ol><li>Add the crate</li><li>Write parsers</li></ol></div>"#,
    "</body></html>",
);

#[test]
fn exports_full_document() {
    let page = Page::parse(CONVERSATION);
    let recorder = Recorder::default();

    let summary = ExportService::new()
        .export_at(&page, &recorder, "2026-10-19 12:00:00")
        .unwrap();

    assert_eq!(summary.filename, "Parsing a-b-c-d_session.md");
    assert_eq!(summary.messages, 4);
    assert_eq!(summary.images, 1);
    assert_eq!(
        summary.to_string(),
        "Parsing a-b-c-d_session.md (4 messages, 1 images noted)"
    );

    let saved = recorder.saved.borrow();
    assert_eq!(saved.len(), 1);
    let (filename, markdown) = &saved[0];
    assert_eq!(filename, "Parsing a-b-c-d_session.md");

    let expected = concat!(
        "# Parsing a-b-c-d\n\n",
        "*Exported: 2026-10-19 12:00:00*\n\n",
        "---\n\n",
        "## User\n\n",
        "How do I parse this?\n\n",
        "*[1 images attached]*\n\n",
        "---\n\n",
        "## Assistant Thinking\n\n",
        "Consider a regex.\n\n",
        "---\n\n",
        "## Tool: web_search\n\n",
        "**Request:**\n\n```\nrust parser\n```\n\n**Response:**\n\n```\n3 results\n```\n\n",
        "---\n\n",
        "## Assistant\n\n",
        "Use **nom**:\n\n\n\n```rust\nlet x = 1;\n```\n\n1. Add the crate\n2. Write parsers\n\n",
        "---\n\n",
    );
    assert_eq!(markdown, expected);
}

#[test]
fn empty_page_never_saves() {
    let page = Page::parse("<html><head><title>Settings - Claude</title></head><body><p>Nothing</p></body></html>");
    let recorder = Recorder::default();

    let err = ExportService::new().export(&page, &recorder).unwrap_err();

    assert!(matches!(err, ChatdownError::NoMessages));
    assert!(err.to_string().starts_with("No messages found"));
    assert!(recorder.saved.borrow().is_empty());
}

#[test]
fn save_failure_is_propagated_verbatim() {
    let page = Page::parse(r#"<div data-testid="user-message">hi</div>"#);
    let recorder = Recorder {
        fail_with: Some("Download failed".to_string()),
        ..Default::default()
    };

    let err = ExportService::new().export(&page, &recorder).unwrap_err();

    assert!(matches!(err, ChatdownError::Save(_)));
    assert_eq!(err.to_string(), "Download failed");
}

#[test]
fn repeated_exports_are_identical() {
    let page = Page::parse(CONVERSATION);
    let service = ExportService::new();

    let (first, _) = service.render(&page, "t").unwrap();
    let (second, _) = service.render(&page, "t").unwrap();

    assert_eq!(first, second);
}

#[test]
fn interleaved_turns_keep_page_order() {
    let mut html = String::new();
    let expected: Vec<(&str, String)> = (0..5)
        .flat_map(|i| {
            [
                ("User", format!("question {}", i)),
                ("Assistant", format!("answer {}", i)),
            ]
        })
        .collect();
    for (role, text) in &expected {
        if *role == "User" {
            html.push_str(&format!(r#"<div><div data-testid="user-message"><p>{}</p></div></div>"#, text));
        } else {
            html.push_str(&format!(r#"<section><div class="standard-markdown"><p>{}</p></div></section>"#, text));
        }
    }

    let transcript = ExportService::new().transcript(&Page::parse(&html));

    let actual: Vec<(String, String)> = transcript
        .messages
        .iter()
        .map(|m| (m.role.to_string(), m.content.clone()))
        .collect();
    let expected: Vec<(String, String)> = expected
        .into_iter()
        .map(|(r, t)| (r.to_string(), t))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn custom_tool_exclusions() {
    let page = Page::parse(
        r#"<div class="w-full"><button>web_fetch</button><code>url</code></div><div data-testid="user-message">go</div>"#,
    );
    let mut service = ExportService::new();
    service.options_mut().tool_exclusions.push("web_fetch".to_string());

    let transcript = service.transcript(&page);

    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.messages[0].role.to_string(), "User");
}
