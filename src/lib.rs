mod component;
mod concept;
mod config;
mod dom;
mod error;
mod filter;
mod node;
mod parser;
mod render;
mod resolver;
mod route;

pub use component::MarkdownLinks;
pub use concept::{
    ConceptNode, ConceptRef, LanguageContext, Localizable, concepts_from_json, load_concepts,
    translate_value,
};
pub use config::Config;
pub use dom::{Dom, DomNode, Element, MountOptions, TextNode, TextOrigin, mount, normalize};
pub use error::Error;
pub use filter::{SupportedTypes, Unsupported, scan};
pub use node::{Node, NodeKind, Visit, Walk};
pub use render::{Fragment, LinkElement, Popover, UiNode, render};
pub use resolver::{resolve, resolve_destination};
pub use route::Route;

/// Parse markdown text into a document tree.
pub fn parse(markdown: &str) -> Node {
    parser::parse(markdown)
}

/// Render markdown to HTML with links resolved against `concepts`, using
/// the given config.
pub fn markdown_links_to_html(markdown: &str, concepts: &[ConceptRef], config: &Config) -> String {
    MarkdownLinks::new(markdown, concepts.to_vec(), config).to_html()
}
