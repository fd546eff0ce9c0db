use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{Code, Node};

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

/// Block-level tags are followed by a newline; containers also get one after the opening tag.
fn block_layout(tag: &str) -> Option<bool> {
    match tag {
        "blockquote" | "ul" | "ol" | "table" | "thead" | "tbody" | "tr" | "dl" | "div" => {
            Some(true)
        }
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li" | "th" | "td" | "dt" | "dd"
        | "hr" => Some(false),
        _ => None,
    }
}

fn write_code(out: &mut String, code: &Code) {
    out.push_str("<pre><code");
    if let Some(lang) = &code.lang {
        out.push_str(" class=\"language-");
        out.push_str(&encode_double_quoted_attribute(lang));
        out.push('"');
    }
    out.push('>');
    out.push_str(&encode_text(&code.value));
    if !code.value.is_empty() {
        out.push('\n');
    }
    out.push_str("</code></pre>\n");
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Root { children } => children.iter().for_each(|child| write_node(out, child)),
        Node::Code(code) => write_code(out, code),
        Node::Text { value } => out.push_str(&encode_text(value)),
        Node::Html { value } => out.push_str(value),
        Node::Element {
            tag,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&encode_double_quoted_attribute(value));
                    out.push('"');
                }
            }
            out.push('>');
            let layout = block_layout(tag);
            if VOID_TAGS.contains(tag) {
                if layout.is_some() {
                    out.push('\n');
                }
                return;
            }
            if layout == Some(true) {
                out.push('\n');
            }
            children.iter().for_each(|child| write_node(out, child));
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
            if layout.is_some() {
                out.push('\n');
            }
        }
    }
}

/// Renders a tree to an HTML fragment.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}
