//! Materialized element tree for a rendered fragment.
//!
//! Mounting lays the fragment out the way an HTML template would, which
//! leaves indentation text between sibling elements. [`normalize`] strips
//! those again once the tree is attached.

use crate::concept::LanguageContext;
use crate::render::{Fragment, LinkElement, UiNode};

/// Where a text node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrigin {
    /// Literal text from the markdown source.
    Content,
    /// Indentation produced while laying out elements.
    Layout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub content: String,
    pub origin: TextOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<DomNode>,
}

impl Element {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            DomNode::Element(element) => Some(element),
            DomNode::Text(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    Element(Element),
    Text(TextNode),
}

/// Options for materializing a fragment.
#[derive(Debug, Clone)]
pub struct MountOptions {
    pub language: LanguageContext,
    pub popover_trigger: String,
}

/// A mounted fragment under its container element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dom {
    pub root: Element,
}

impl Dom {
    /// Direct children of the container, text nodes included.
    pub fn child_count(&self) -> usize {
        self.root.children.len()
    }

    /// Text nodes anywhere in the tree.
    pub fn text_node_count(&self) -> usize {
        fn count(element: &Element) -> usize {
            element
                .children
                .iter()
                .map(|child| match child {
                    DomNode::Text(_) => 1,
                    DomNode::Element(inner) => count(inner),
                })
                .sum()
        }
        count(&self.root)
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        element_to_html(&self.root, &mut out);
        out
    }
}

/// Materialize a fragment into a `<div>` container.
pub fn mount(fragment: &Fragment, options: &MountOptions) -> Dom {
    let mut root = Element::new("div");
    root.attrs.push(("class", "markdown-links".to_string()));
    root.children = mount_children(fragment, 0, options);
    Dom { root }
}

fn mount_children(nodes: &[UiNode], depth: usize, options: &MountOptions) -> Vec<DomNode> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let inner = format!("\n{}", "  ".repeat(depth + 1));
    let mut children = Vec::with_capacity(nodes.len() * 2 + 1);
    for node in nodes {
        children.push(layout(&inner));
        children.push(DomNode::Element(mount_node(node, depth + 1, options)));
    }
    children.push(layout(&format!("\n{}", "  ".repeat(depth))));
    children
}

fn mount_node(node: &UiNode, depth: usize, options: &MountOptions) -> Element {
    match node {
        UiNode::Block { children } => {
            let mut p = Element::new("p");
            p.children = mount_children(children, depth, options);
            p
        }
        UiNode::Text { content } => {
            let mut span = Element::new("span");
            span.children.push(content_text(content));
            span
        }
        UiNode::Link(link) => mount_link(link, options),
    }
}

fn mount_link(link: &LinkElement, options: &MountOptions) -> Element {
    let mut a = Element::new("a");
    if link.is_interactive() {
        a.attrs.push(("href", link.route.to_string()));
    }
    if let Some(popover) = &link.popover {
        a.attrs
            .push(("data-popover-trigger", options.popover_trigger.clone()));
        if let Some(content) = popover.content(&options.language) {
            a.attrs.push(("data-popover", content));
        }
    }
    if !link.label.is_empty() {
        a.children.push(content_text(&link.label));
    }
    a
}

fn layout(content: &str) -> DomNode {
    DomNode::Text(TextNode {
        content: content.to_string(),
        origin: TextOrigin::Layout,
    })
}

fn content_text(content: &str) -> DomNode {
    DomNode::Text(TextNode {
        content: content.to_string(),
        origin: TextOrigin::Content,
    })
}

/// Remove whitespace-only text left behind by layout. Literal text is never
/// touched, even when it is all whitespace. Returns the number of nodes removed.
pub fn normalize(dom: &mut Dom) -> usize {
    let removed = normalize_element(&mut dom.root);
    tracing::debug!(removed, "removed layout whitespace");
    removed
}

fn normalize_element(element: &mut Element) -> usize {
    let before = element.children.len();
    element.children.retain(|child| {
        !matches!(
            child,
            DomNode::Text(TextNode { content, origin: TextOrigin::Layout })
                if content.trim().is_empty()
        )
    });
    let mut removed = before - element.children.len();

    for child in &mut element.children {
        if let DomNode::Element(inner) = child {
            removed += normalize_element(inner);
        }
    }
    removed
}

fn element_to_html(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, out);
        out.push('"');
    }
    out.push('>');

    for child in &element.children {
        match child {
            DomNode::Element(inner) => element_to_html(inner, out),
            DomNode::Text(text) => escape_into(&text.content, out),
        }
    }

    out.push_str("</");
    out.push_str(element.tag);
    out.push('>');
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::{ConceptRef, Localizable};
    use crate::node::Node;
    use crate::render::render;

    fn options() -> MountOptions {
        MountOptions {
            language: LanguageContext::strict("en"),
            popover_trigger: "mouseenter:mouseleave".into(),
        }
    }

    fn three_siblings() -> Fragment {
        let tree = Node::document(vec![
            Node::paragraph(vec![Node::text("one")]),
            Node::paragraph(vec![Node::text("   ")]),
            Node::paragraph(vec![Node::text("three")]),
        ]);
        render(&tree, &[])
    }

    #[test]
    fn mount_adds_layout_whitespace_between_siblings() {
        let dom = mount(&three_siblings(), &options());
        // Three paragraphs, one indent before each and one closing indent
        assert_eq!(dom.child_count(), 7);
        assert_eq!(dom.root.elements().count(), 3);
    }

    #[test]
    fn normalize_removes_only_layout_whitespace() {
        let mut dom = mount(&three_siblings(), &options());
        assert_eq!(dom.text_node_count(), 4 + 3 * (2 + 1));

        let removed = normalize(&mut dom);
        assert_eq!(dom.child_count(), 3);
        // Each paragraph loses its own indent pair and keeps its span
        assert_eq!(removed, 4 + 3 * 2);
        assert_eq!(dom.text_node_count(), 3);
        assert_eq!(
            dom.to_html(),
            "<div class=\"markdown-links\"><p><span>one</span></p><p><span>   </span></p><p><span>three</span></p></div>"
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut dom = mount(&three_siblings(), &options());
        normalize(&mut dom);
        let once = dom.clone();
        assert_eq!(normalize(&mut dom), 0);
        assert_eq!(dom, once);
    }

    #[test]
    fn empty_fragment_mounts_empty_container() {
        let mut dom = mount(&Vec::new(), &options());
        assert_eq!(dom.child_count(), 0);
        assert_eq!(normalize(&mut dom), 0);
        assert_eq!(dom.to_html(), "<div class=\"markdown-links\"></div>");
    }

    #[test]
    fn link_attributes() {
        let concept = ConceptRef::new("concept123", "g1", "c1")
            .with_definition(Localizable::new().with("en", "A \"thing\"."));
        let tree = Node::document(vec![
            Node::link("concept123", vec![Node::text("foo")]),
            Node::link("unrelated", vec![Node::text("bar")]),
        ]);
        let mut dom = mount(&render(&tree, &[concept]), &options());
        normalize(&mut dom);

        let links: Vec<_> = dom.root.elements().collect();
        assert_eq!(links[0].attr("href"), Some("/concepts/g1/concept/c1"));
        assert_eq!(links[0].attr("data-popover"), Some("A \"thing\"."));
        assert_eq!(links[1].attr("href"), None);
        assert_eq!(links[1].attr("data-popover-trigger"), None);
        assert_eq!(
            dom.to_html(),
            "<div class=\"markdown-links\"><a href=\"/concepts/g1/concept/c1\" data-popover-trigger=\"mouseenter:mouseleave\" data-popover=\"A &quot;thing&quot;.\">foo</a><a>bar</a></div>"
        );
    }

    #[test]
    fn text_is_escaped() {
        let tree = Node::document(vec![Node::text("<script>&</script>")]);
        let mut dom = mount(&render(&tree, &[]), &options());
        normalize(&mut dom);
        assert_eq!(
            dom.to_html(),
            "<div class=\"markdown-links\"><span>&lt;script&gt;&amp;&lt;/script&gt;</span></div>"
        );
    }
}
