use pulldown_cmark::{Event, Options, Parser, Tag};

use crate::node::{Node, NodeKind};

/// Parse markdown text into a document tree
pub fn parse(markdown: &str) -> Node {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut state = ParseState::new();

    for event in parser {
        process_event(event, &mut state);
    }

    state.finish()
}

/// Containers nested deeper than this are folded into the innermost kept one.
/// Only unsupported block containers (quotes, lists) nest this far.
pub(crate) const MAX_NESTING: usize = 64;

struct ParseState {
    // Open containers; the document is always at the bottom
    stack: Vec<Node>,
    // Start events dropped past MAX_NESTING that still await their End
    folded: usize,
    truncated: bool,
}

impl ParseState {
    fn new() -> Self {
        Self {
            stack: vec![Node::new(NodeKind::Document)],
            folded: 0,
            truncated: false,
        }
    }

    fn current(&mut self) -> &mut Node {
        // The document is never popped by `close`
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn open(&mut self, kind: NodeKind) {
        if self.stack.len() > MAX_NESTING {
            if !self.truncated {
                tracing::warn!(
                    node_type = kind.type_name(),
                    max_nesting = MAX_NESTING,
                    "markdown nested too deeply, folding inner containers"
                );
                self.truncated = true;
            }
            self.folded += 1;
            return;
        }
        self.stack.push(Node::new(kind));
    }

    fn close(&mut self) {
        if self.folded > 0 {
            self.folded -= 1;
            return;
        }
        if self.stack.len() > 1 {
            if let Some(node) = self.stack.pop() {
                self.current().children.push(node);
            }
        }
    }

    fn push(&mut self, node: Node) {
        self.current().children.push(node);
    }

    /// Append text, merging it into a directly preceding text run.
    fn push_text(&mut self, text: &str) {
        let children = &mut self.current().children;
        if let Some(Node {
            kind: NodeKind::Text { literal },
            ..
        }) = children.last_mut()
        {
            literal.push_str(text);
        } else {
            children.push(Node::text(text));
        }
    }

    fn finish(mut self) -> Node {
        // Unbalanced events should not happen, but never lose content
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack.pop().unwrap_or_else(|| Node::document(Vec::new()))
    }
}

fn process_event(event: Event, state: &mut ParseState) {
    match event {
        Event::Start(tag) => state.open(tag_kind(tag)),
        Event::End(_) => state.close(),

        // Text content
        Event::Text(text) => state.push_text(&text),

        // Inline code keeps its content so the filter can report it
        Event::Code(code) => state.push(Node::other("code", vec![Node::text(code.into_string())])),

        // Raw HTML lines arrive inside an html_block container
        Event::Html(html) => state.push_text(&html),
        Event::InlineHtml(html) => {
            state.push(Node::other("html_inline", vec![Node::text(html.into_string())]))
        }

        // Soft breaks read as a space within the paragraph
        Event::SoftBreak => state.push_text(" "),
        Event::HardBreak => state.push(Node::other("linebreak", Vec::new())),

        Event::Rule => state.push(Node::other("thematic_break", Vec::new())),

        Event::TaskListMarker(_) => state.push(Node::other("task_list_marker", Vec::new())),
        Event::FootnoteReference(_) => state.push(Node::other("footnote_reference", Vec::new())),
        Event::InlineMath(_) | Event::DisplayMath(_) => {
            state.push(Node::other("math", Vec::new()))
        }

        #[allow(unreachable_patterns)]
        _ => {}
    }
}

fn tag_kind(tag: Tag) -> NodeKind {
    let name = match tag {
        Tag::Paragraph => return NodeKind::Paragraph,
        Tag::Link {
            dest_url, title, ..
        } => {
            return NodeKind::Link {
                destination: dest_url.into_string(),
                title: title.into_string(),
            };
        }
        Tag::Heading { .. } => "heading",
        Tag::BlockQuote(_) => "block_quote",
        Tag::CodeBlock(_) => "code_block",
        Tag::HtmlBlock => "html_block",
        Tag::List(_) => "list",
        Tag::Item => "item",
        Tag::Emphasis => "emph",
        Tag::Strong => "strong",
        Tag::Strikethrough => "strikethrough",
        Tag::Image { .. } => "image",
        Tag::Table(_) => "table",
        Tag::TableHead => "table_head",
        Tag::TableRow => "table_row",
        Tag::TableCell => "table_cell",
        Tag::FootnoteDefinition(_) => "footnote_definition",
        Tag::MetadataBlock(_) => "metadata_block",
        _ => "unknown",
    };
    NodeKind::Other { name }
}
