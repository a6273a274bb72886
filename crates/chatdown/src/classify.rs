//! Segment classifiers.
//!
//! Scans a page for the four kinds of transcript segments. Thinking blocks
//! are resolved first because assistant bodies nested inside them must not
//! be reported as assistant turns.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::markers::Markers;
use crate::options::ExportOptions;
use crate::page::{NodeId, Page};

/// The kind of a classified segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    User,
    Assistant,
    /// Tool call block with the tool name from its button
    Tool(String),
    Thinking,
}

/// A classified chunk of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// The page node used for ordering and content extraction
    pub anchor: NodeId,
    /// Uploaded image URLs (user and assistant turns only)
    pub images: Vec<String>,
}

impl Segment {
    fn new(kind: SegmentKind, anchor: NodeId) -> Self {
        Self {
            kind,
            anchor,
            images: Vec::new(),
        }
    }
}

/// Segments found on a page, one list per kind, each in tree order
/// of discovery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub user: Vec<Segment>,
    pub assistant: Vec<Segment>,
    pub tool: Vec<Segment>,
    pub thinking: Vec<Segment>,
}

impl Candidates {
    pub fn len(&self) -> usize {
        self.user.len() + self.assistant.len() + self.tool.len() + self.thinking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into one list, kinds in a fixed order
    pub fn into_segments(self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(self.len());
        segments.extend(self.user);
        segments.extend(self.assistant);
        segments.extend(self.tool);
        segments.extend(self.thinking);
        segments
    }
}

/// Classify every segment on the page
pub fn classify(page: &Page, markers: &Markers, options: &ExportOptions) -> Candidates {
    let buttons = page.select(&markers.button);

    let thinking = classify_thinking(page, &buttons, markers, options);
    let tool = classify_tools(page, &buttons, markers, options);

    let user = page
        .select(&markers.user_message)
        .into_iter()
        .map(|id| Segment {
            images: extract_images(page, id, markers, options),
            ..Segment::new(SegmentKind::User, id)
        })
        .collect::<Vec<_>>();

    let assistant = page
        .select(&markers.assistant_markdown)
        .into_iter()
        .filter(|id| !thinking.iter().any(|t| page.contains(t.anchor, *id)))
        .map(|id| Segment {
            images: extract_images(page, id, markers, options),
            ..Segment::new(SegmentKind::Assistant, id)
        })
        .collect::<Vec<_>>();

    debug!(
        users = user.len(),
        assistants = assistant.len(),
        tools = tool.len(),
        thinking = thinking.len(),
        "classified page segments"
    );

    Candidates {
        user,
        assistant,
        tool,
        thinking,
    }
}

/// Tool blocks: buttons labeled with a tool name, anchored at their container
pub fn classify_tools(
    page: &Page,
    buttons: &[NodeId],
    markers: &Markers,
    options: &ExportOptions,
) -> Vec<Segment> {
    let mut containers: IndexMap<NodeId, String> = IndexMap::new();

    for &button in buttons {
        let text = page.text_content(button);
        let name = text.trim();
        if !options.is_tool_name(name) {
            continue;
        }

        let container = markers
            .tool_containers
            .iter()
            .find_map(|marker| page.closest(button, marker));

        match container {
            Some(container) => {
                containers.entry(container).or_insert_with(|| name.to_string());
            }
            None => debug!(tool = name, "tool button without a container"),
        }
    }

    containers
        .into_iter()
        .map(|(anchor, name)| Segment::new(SegmentKind::Tool(name), anchor))
        .collect()
}

/// Thinking blocks: labeled buttons, or collapsed row buttons, anchored at
/// their rounded transition container
pub fn classify_thinking(
    page: &Page,
    buttons: &[NodeId],
    markers: &Markers,
    options: &ExportOptions,
) -> Vec<Segment> {
    let mut containers: IndexSet<NodeId> = IndexSet::new();

    for &button in buttons {
        if !is_thinking_button(page, button, markers, options) {
            continue;
        }
        if let Some(container) = thinking_container(page, button, markers) {
            containers.insert(container);
        }
    }

    containers
        .into_iter()
        .map(|anchor| Segment::new(SegmentKind::Thinking, anchor))
        .collect()
}

fn is_thinking_button(page: &Page, button: NodeId, markers: &Markers, options: &ExportOptions) -> bool {
    if options.is_thinking_label(page.text_content(button).trim()) {
        return true;
    }

    markers.row_button.matches(page.node(button))
        && page.find_within(button, &markers.summary_span).is_some()
        && thinking_container(page, button, markers).is_some()
}

fn thinking_container(page: &Page, button: NodeId, markers: &Markers) -> Option<NodeId> {
    page.closest(button, &markers.rounded_container)
        .filter(|c| markers.transition_container.matches(page.node(*c)))
}

/// Uploaded image URLs inside a node (the node included)
pub fn extract_images(page: &Page, id: NodeId, markers: &Markers, options: &ExportOptions) -> Vec<String> {
    std::iter::once(id)
        .chain(page.descendants(id))
        .filter(|d| markers.image.matches(page.node(*d)))
        .filter_map(|d| page.node(d).attr("src"))
        .filter(|src| options.is_uploaded_image(src))
        .map(|src| src.to_string())
        .collect()
}
