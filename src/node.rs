/// Node types the renderer knows how to show. Everything else the markdown
/// grammar produces is carried as `Other` with its commonmark type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Link {
        destination: String,
        title: String,
    },
    Text {
        literal: String,
    },
    Other {
        name: &'static str,
    },
}

impl NodeKind {
    /// The commonmark type tag for this node (`document`, `link`, `emph`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Link { .. } => "link",
            NodeKind::Text { .. } => "text",
            NodeKind::Other { name } => name,
        }
    }
}

/// A node of the parsed markdown document. Children are owned and kept in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn document(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Document,
            children,
        }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Paragraph,
            children,
        }
    }

    pub fn text(literal: impl Into<String>) -> Self {
        Self::new(NodeKind::Text {
            literal: literal.into(),
        })
    }

    pub fn link(destination: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Link {
                destination: destination.into(),
                title: String::new(),
            },
            children,
        }
    }

    pub fn other(name: &'static str, children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Other { name },
            children,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Raw text content, for text nodes.
    pub fn literal(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { literal } => Some(literal),
            _ => None,
        }
    }

    /// Raw link target, for link nodes.
    pub fn destination(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Link { destination, .. } => Some(destination),
            _ => None,
        }
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// Depth-first, document-order traversal of this node and all of its
    /// descendants. Each visit carries a borrowed reference to its parent.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![Visit {
                node: self,
                parent: None,
                depth: 0,
            }],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a Node,
    pub parent: Option<&'a Node>,
    pub depth: usize,
}

pub struct Walk<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        // Reverse so the first child is popped next
        for child in visit.node.children.iter().rev() {
            self.stack.push(Visit {
                node: child,
                parent: Some(visit.node),
                depth: visit.depth + 1,
            });
        }
        Some(visit)
    }
}
