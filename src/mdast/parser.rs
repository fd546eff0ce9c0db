use indexmap::{IndexMap, indexmap};
use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Tag};

use super::{Code, Node, text_content};

struct TreeBuilder<'src> {
    events: pulldown_cmark::Parser<'src>,
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

/// Splits a fence info string into its language word and the free text after it.
fn split_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => (non_empty(lang), non_empty(meta.trim())),
        None => (non_empty(info), None),
    }
}

fn code_block(kind: CodeBlockKind<'_>, children: Vec<Node>) -> Node {
    let (lang, meta) = match kind {
        CodeBlockKind::Fenced(info) => split_info(&info),
        CodeBlockKind::Indented => (None, None),
    };
    let mut value = String::new();
    text_content(&mut value, &children);
    if value.ends_with('\n') {
        value.pop();
    }
    Node::Code(Code {
        lang,
        meta,
        value,
        frontmatter: None,
    })
}

fn align_cells(aligns: &[Alignment], rows: &mut [Node]) {
    for row in rows {
        let Some(cells) = row.children_mut() else {
            continue;
        };
        for (cell, align) in cells.iter_mut().zip(aligns) {
            let Node::Element { attrs, .. } = cell else {
                continue;
            };
            let align = match align {
                Alignment::None => continue,
                Alignment::Left => "left",
                Alignment::Center => "center",
                Alignment::Right => "right",
            };
            attrs.insert("align", align.to_owned());
        }
    }
}

fn table(aligns: &[Alignment], mut rows: Vec<Node>) -> Node {
    align_cells(aligns, &mut rows);
    let mut rows = rows.into_iter();
    let mut children = Vec::new();
    if let Some(Node::Element {
        children: cells, ..
    }) = rows.next()
    {
        let cells = cells
            .into_iter()
            .map(|cell| match cell {
                Node::Element {
                    attrs, children, ..
                } => Node::Element {
                    tag: "th",
                    attrs,
                    children,
                },
                other => other,
            })
            .collect();
        children.push(Node::element(
            "thead",
            vec![Node::element("tr", cells)],
        ));
    }
    let body = rows.collect::<Vec<_>>();
    if !body.is_empty() {
        children.push(Node::element("tbody", body));
    }
    Node::element("table", children)
}

impl<'src> TreeBuilder<'src> {
    /// Consumes events up to the end of the current container.
    ///
    /// Events are balanced, so the first unmatched `End` closes the container.
    fn parse_children(&mut self) -> Vec<Node> {
        let mut children = Vec::new();
        while let Some(event) = self.events.next() {
            if matches!(event, Event::End(_)) {
                break;
            }
            self.push_event(event, &mut children);
        }
        children
    }

    fn push_container(&mut self, tag: Tag<'src>, out: &mut Vec<Node>) {
        let children = self.parse_children();
        let node = match tag {
            Tag::Paragraph => Node::element("p", children),
            Tag::Heading {
                level, id, classes, ..
            } => {
                let mut attrs = IndexMap::new();
                if let Some(id) = id {
                    attrs.insert("id", id.to_string());
                }
                if !classes.is_empty() {
                    attrs.insert("class", classes.join(" "));
                }
                Node::Element {
                    tag: heading_tag(level),
                    attrs,
                    children,
                }
            }
            Tag::BlockQuote(_) => Node::element("blockquote", children),
            Tag::CodeBlock(kind) => code_block(kind, children),
            Tag::HtmlBlock => {
                out.extend(children);
                return;
            }
            Tag::List(None) => Node::element("ul", children),
            Tag::List(Some(1)) => Node::element("ol", children),
            Tag::List(Some(start)) => Node::Element {
                tag: "ol",
                attrs: indexmap! {"start" => start.to_string()},
                children,
            },
            Tag::Item => Node::element("li", children),
            Tag::FootnoteDefinition(label) => Node::Element {
                tag: "div",
                attrs: indexmap! {
                    "class" => "footnote-definition".to_owned(),
                    "id" => label.to_string(),
                },
                children,
            },
            Tag::Table(aligns) => table(&aligns, children),
            Tag::TableHead | Tag::TableRow => Node::element("tr", children),
            Tag::TableCell => Node::element("td", children),
            Tag::Emphasis => Node::element("em", children),
            Tag::Strong => Node::element("strong", children),
            Tag::Strikethrough => Node::element("del", children),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut attrs = indexmap! {"href" => dest_url.to_string()};
                if !title.is_empty() {
                    attrs.insert("title", title.to_string());
                }
                Node::Element {
                    tag: "a",
                    attrs,
                    children,
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let mut alt = String::new();
                text_content(&mut alt, &children);
                let mut attrs = indexmap! {
                    "src" => dest_url.to_string(),
                    "alt" => alt,
                };
                if !title.is_empty() {
                    attrs.insert("title", title.to_string());
                }
                Node::Element {
                    tag: "img",
                    attrs,
                    children: Vec::new(),
                }
            }
            // Extensions left disabled in `parse` never start a container.
            _ => {
                out.extend(children);
                return;
            }
        };
        out.push(node);
    }

    fn push_event(&mut self, event: Event<'src>, out: &mut Vec<Node>) {
        let node = match event {
            Event::Start(tag) => return self.push_container(tag, out),
            Event::End(_) => return,
            Event::Text(text) => Node::text(text.into_string()),
            Event::Code(code) => Node::element("code", vec![Node::text(code.into_string())]),
            Event::Html(html) | Event::InlineHtml(html) => Node::Html {
                value: html.into_string(),
            },
            Event::FootnoteReference(label) => Node::element(
                "sup",
                vec![Node::Element {
                    tag: "a",
                    attrs: indexmap! {"href" => format!("#{label}")},
                    children: vec![Node::text(label.into_string())],
                }],
            ),
            Event::SoftBreak => Node::text("\n"),
            Event::HardBreak => Node::element("br", Vec::new()),
            Event::Rule => Node::element("hr", Vec::new()),
            Event::TaskListMarker(checked) => {
                let mut attrs = indexmap! {
                    "type" => "checkbox".to_owned(),
                    "disabled" => String::new(),
                };
                if checked {
                    attrs.insert("checked", String::new());
                }
                Node::Element {
                    tag: "input",
                    attrs,
                    children: Vec::new(),
                }
            }
            _ => return,
        };
        out.push(node);
    }
}

/// Builds a [`Node::Root`] from CommonMark source with tables, task lists,
/// strikethrough and footnotes enabled.
pub fn parse(src: &str) -> Node {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let mut builder = TreeBuilder {
        events: pulldown_cmark::Parser::new_ext(src, options),
    };
    let mut children = Vec::new();
    while let Some(event) = builder.events.next() {
        builder.push_event(event, &mut children);
    }
    Node::root(children)
}
