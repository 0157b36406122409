use std::collections::BTreeSet;

use crate::node::Node;

/// The set of node type tags the renderer shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedTypes(BTreeSet<String>);

impl SupportedTypes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(types.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.0.contains(type_name)
    }
}

impl Default for SupportedTypes {
    fn default() -> Self {
        Self::new(["document", "paragraph", "link", "text"])
    }
}

/// A node the renderer will not show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsupported {
    pub node_type: &'static str,
    pub depth: usize,
}

/// Walk the whole tree and warn once for every node whose type is not
/// supported. The tree is left untouched; the returned report is informative.
pub fn scan(tree: &Node, supported: &SupportedTypes) -> Vec<Unsupported> {
    let mut report = Vec::new();

    for visit in tree.walk() {
        let node_type = visit.node.type_name();
        if supported.contains(node_type) {
            continue;
        }
        tracing::warn!(
            target: "termdown::filter",
            node_type,
            parent = visit.parent.map(Node::type_name).unwrap_or("none"),
            "unsupported markdown node will not be rendered"
        );
        report.push(Unsupported {
            node_type,
            depth: visit.depth,
        });
    }

    report
}
