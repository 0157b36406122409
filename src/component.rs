use crate::concept::ConceptRef;
use crate::config::Config;
use crate::dom::{Dom, MountOptions, mount, normalize};
use crate::filter::{Unsupported, scan};
use crate::node::Node;
use crate::parser::parse;
use crate::render::{Fragment, render};

/// A markdown property value shown with its links resolved against the
/// concepts the host form has already loaded.
///
/// The tree is parsed and checked once on construction. Rendering is
/// repeatable; [`MarkdownLinks::attach`] mounts the fragment and then runs
/// the post-attach cleanup.
pub struct MarkdownLinks {
    node: Node,
    related_concepts: Vec<ConceptRef>,
    unsupported: Vec<Unsupported>,
    mount_options: MountOptions,
}

impl MarkdownLinks {
    pub fn new(value: &str, related_concepts: Vec<ConceptRef>, config: &Config) -> Self {
        let node = parse(value);
        let unsupported = scan(&node, &config.supported_types());
        tracing::debug!(
            candidates = related_concepts.len(),
            unsupported = unsupported.len(),
            "parsed markdown value"
        );
        Self {
            node,
            related_concepts,
            unsupported,
            mount_options: config.mount_options(),
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Nodes that were reported when the value was parsed.
    pub fn unsupported(&self) -> &[Unsupported] {
        &self.unsupported
    }

    pub fn view(&self) -> Fragment {
        render(&self.node, &self.related_concepts)
    }

    /// Mount the rendered fragment and clean it up.
    pub fn attach(&self) -> Dom {
        let mut dom = mount(&self.view(), &self.mount_options);
        Self::after_attach(&mut dom);
        dom
    }

    /// Cleanup to run once the fragment exists in its container.
    pub fn after_attach(dom: &mut Dom) {
        normalize(dom);
    }

    pub fn to_html(&self) -> String {
        self.attach().to_html()
    }
}
