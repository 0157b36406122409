use crate::concept::{ConceptRef, LanguageContext, Localizable, translate_value};
use crate::node::{Node, NodeKind};
use crate::resolver::resolve;
use crate::route::Route;

/// Rendered output of a markdown tree: a flat run of UI nodes.
pub type Fragment = Vec<UiNode>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiNode {
    /// A paragraph wrapping its rendered children.
    Block { children: Vec<UiNode> },
    /// Inert text, shown verbatim.
    Text { content: String },
    Link(LinkElement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub label: String,
    pub route: Route,
    pub popover: Option<Popover>,
}

impl LinkElement {
    /// Whether the link navigates anywhere.
    pub fn is_interactive(&self) -> bool {
        !self.route.is_empty()
    }
}

/// Hover content for a resolved link. The definition is only translated
/// when the popover is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popover {
    pub definition: Option<Localizable>,
}

impl Popover {
    pub fn content(&self, language: &LanguageContext) -> Option<String> {
        self.definition
            .as_ref()
            .and_then(|definition| translate_value(definition, language))
    }
}

/// Render a markdown tree, resolving links against `candidates`.
pub fn render(node: &Node, candidates: &[ConceptRef]) -> Fragment {
    let mut out = Vec::new();
    render_node(node, candidates, &mut out);
    out
}

fn render_children(node: &Node, candidates: &[ConceptRef], out: &mut Vec<UiNode>) {
    for child in &node.children {
        render_node(child, candidates, out);
    }
}

fn render_node(node: &Node, candidates: &[ConceptRef], out: &mut Vec<UiNode>) {
    match &node.kind {
        NodeKind::Document => render_children(node, candidates, out),
        NodeKind::Paragraph => {
            let mut children = Vec::new();
            render_children(node, candidates, &mut children);
            out.push(UiNode::Block { children });
        }
        NodeKind::Text { literal } => out.push(UiNode::Text {
            content: literal.clone(),
        }),
        NodeKind::Link { .. } => out.push(UiNode::Link(render_link(node, candidates))),
        // Already reported by the filter
        NodeKind::Other { .. } => {}
    }
}

fn render_link(node: &Node, candidates: &[ConceptRef]) -> LinkElement {
    // The visible label is the first child's text, not the destination
    let label = node
        .first_child()
        .and_then(Node::literal)
        .unwrap_or_default()
        .to_string();

    match resolve(node, candidates) {
        Some(target) => LinkElement {
            label,
            route: Route::concept(&target.graph_id, &target.id),
            popover: Some(Popover {
                definition: target.definition().cloned(),
            }),
        },
        None => LinkElement {
            label,
            route: Route::none(),
            popover: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn text(content: &str) -> UiNode {
        UiNode::Text {
            content: content.to_string(),
        }
    }

    fn concept123() -> ConceptRef {
        ConceptRef::new("concept123", "g1", "c1")
            .with_definition(Localizable::new().with("en", "A thing."))
    }

    #[test]
    fn paragraph_of_text() {
        assert_eq!(
            render(&parse("Hello world"), &[]),
            vec![UiNode::Block {
                children: vec![text("Hello world")]
            }]
        );
    }

    #[test]
    fn resolved_link() {
        let fragment = render(&parse("See [foo](concept123) for details."), &[concept123()]);
        let UiNode::Block { children } = &fragment[0] else {
            panic!("expected a block, got {:?}", fragment[0]);
        };

        assert_eq!(children.len(), 3);
        assert_eq!(children[0], text("See "));
        assert_eq!(children[2], text(" for details."));

        let UiNode::Link(link) = &children[1] else {
            panic!("expected a link, got {:?}", children[1]);
        };
        assert_eq!(link.label, "foo");
        assert!(link.is_interactive());
        assert_eq!(link.route.segments(), ["/concepts", "g1", "concept", "c1"]);
        let popover = link.popover.as_ref().unwrap();
        assert_eq!(
            popover.content(&LanguageContext::strict("en")).as_deref(),
            Some("A thing.")
        );
        assert_eq!(popover.content(&LanguageContext::strict("sv")), None);
    }

    #[test]
    fn unresolved_link_is_inert() {
        let fragment = render(
            &parse("[label](https://example.com/unrelated)"),
            &[ConceptRef::new("xyz", "g", "1")],
        );
        assert_eq!(
            fragment,
            vec![UiNode::Block {
                children: vec![UiNode::Link(LinkElement {
                    label: "label".into(),
                    route: Route::none(),
                    popover: None,
                })]
            }]
        );
    }

    #[test]
    fn text_is_not_reinterpreted() {
        let tree = Node::document(vec![Node::paragraph(vec![Node::text("<b>*x*</b>")])]);
        assert_eq!(
            render(&tree, &[]),
            vec![UiNode::Block {
                children: vec![text("<b>*x*</b>")]
            }]
        );
    }

    #[test]
    fn unsupported_nodes_render_nothing_but_siblings_do() {
        let fragment = render(&parse("before *emphasis* after"), &[]);
        assert_eq!(
            fragment,
            vec![UiNode::Block {
                children: vec![text("before "), text(" after")]
            }]
        );
    }

    #[test]
    fn unsupported_block_does_not_blank_document() {
        let fragment = render(&parse("# Heading\n\nBody"), &[]);
        assert_eq!(
            fragment,
            vec![UiNode::Block {
                children: vec![text("Body")]
            }]
        );
    }

    #[test]
    fn link_label_from_non_text_child_is_empty() {
        let tree = Node::link("concept123", vec![Node::other("emph", vec![Node::text("x")])]);
        let fragment = render(&tree, &[concept123()]);
        let UiNode::Link(link) = &fragment[0] else {
            panic!("expected a link");
        };
        assert_eq!(link.label, "");
        assert!(link.is_interactive());
    }

    #[test]
    fn resolved_concept_without_definition_has_empty_popover() {
        let fragment = render(
            &Node::link("concept123", vec![Node::text("foo")]),
            &[ConceptRef::new("concept123", "g1", "c1")],
        );
        let UiNode::Link(link) = &fragment[0] else {
            panic!("expected a link");
        };
        let popover = link.popover.as_ref().unwrap();
        assert_eq!(popover.content(&LanguageContext::strict("en")), None);
    }
}
