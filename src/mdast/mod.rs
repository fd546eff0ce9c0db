//! Document tree shared by the parser, the transforms and the renderer.

use indexmap::IndexMap;
use serde::Serialize;

mod parser;
mod render;
mod value;
mod visit;

pub use parser::parse;
pub use render::to_html;
pub use value::Value;
pub use visit::{try_visit_code_mut, try_visit_mut, visit, visit_code_mut, visit_mut};

/// Structured header data of a code block, in header order.
pub type Frontmatter = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Node {
    Root {
        children: Vec<Node>,
    },
    Element {
        tag: &'static str,
        attrs: IndexMap<&'static str, String>,
        children: Vec<Node>,
    },
    Code(Code),
    Text {
        value: String,
    },
    Html {
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Element,
    Code,
    Text,
    Html,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Code {
    pub lang: Option<String>,
    pub meta: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Frontmatter>,
}

impl Code {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl Node {
    pub fn root(children: Vec<Node>) -> Self {
        Self::Root { children }
    }

    pub fn element(tag: &'static str, children: Vec<Node>) -> Self {
        Self::Element {
            tag,
            attrs: Default::default(),
            children,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Root { .. } => NodeKind::Root,
            Self::Element { .. } => NodeKind::Element,
            Self::Code(_) => NodeKind::Code,
            Self::Text { .. } => NodeKind::Text,
            Self::Html { .. } => NodeKind::Html,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Root { children } | Self::Element { children, .. } => children,
            Self::Code(_) | Self::Text { .. } | Self::Html { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Root { children } | Self::Element { children, .. } => Some(children),
            Self::Code(_) | Self::Text { .. } | Self::Html { .. } => None,
        }
    }

    pub fn as_code(&self) -> Option<&Code> {
        match self {
            Self::Code(code) => Some(code),
            _ => None,
        }
    }

    pub fn as_code_mut(&mut self) -> Option<&mut Code> {
        match self {
            Self::Code(code) => Some(code),
            _ => None,
        }
    }
}

impl From<Code> for Node {
    fn from(code: Code) -> Self {
        Self::Code(code)
    }
}

/// Concatenated text of a subtree, code values included.
pub fn text_content(buf: &mut String, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Text { value } => buf.push_str(value),
            Node::Code(code) => buf.push_str(&code.value),
            Node::Root { children } | Node::Element { children, .. } => {
                text_content(buf, children)
            }
            Node::Html { .. } => {}
        }
    }
}

/// Code blocks of a tree in document order.
pub fn code_blocks(tree: &Node) -> Vec<&Code> {
    let mut blocks = Vec::new();
    collect_code(tree, &mut blocks);
    blocks
}

fn collect_code<'a>(node: &'a Node, out: &mut Vec<&'a Code>) {
    if let Node::Code(code) = node {
        out.push(code);
    }
    node.children()
        .iter()
        .for_each(|child| collect_code(child, out));
}
