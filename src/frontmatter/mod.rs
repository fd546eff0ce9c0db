//! Frontmatter detection and parsing for code block contents.
//!
//! A header opens with a delimiter line at the very start of the text
//! (`---` for YAML, `+++` for TOML), and closes with the next line made of
//! the same delimiter. YAML headers may also close with the `...` document
//! end marker. Whatever follows the closing line is the body.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::{
    ErrorDetail,
    mdast::{Frontmatter, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontmatterFormat {
    Yaml,
    Toml,
}

pub const ALL_FORMATS: &[FrontmatterFormat] = &[FrontmatterFormat::Yaml, FrontmatterFormat::Toml];

struct Fence {
    open: regex::Regex,
    close: regex::Regex,
}

static YAML_FENCE: LazyLock<Fence> = LazyLock::new(|| Fence {
    open: regex::Regex::new(r"\A\x{FEFF}?---[ \t]*\r?\n").unwrap(),
    close: regex::Regex::new(r"(?mR)^(?:---|\.\.\.)[ \t]*$").unwrap(),
});

static TOML_FENCE: LazyLock<Fence> = LazyLock::new(|| Fence {
    open: regex::Regex::new(r"\A\x{FEFF}?\+\+\+[ \t]*\r?\n").unwrap(),
    close: regex::Regex::new(r"(?mR)^\+\+\+[ \t]*$").unwrap(),
});

impl FrontmatterFormat {
    fn fence(self) -> &'static Fence {
        match self {
            Self::Yaml => &YAML_FENCE,
            Self::Toml => &TOML_FENCE,
        }
    }
}

/// A detected header, borrowed from the text it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub format: FrontmatterFormat,
    /// Raw lines between the delimiters.
    pub matter: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub attributes: Frontmatter,
    pub body: String,
    pub format: Option<FrontmatterFormat>,
}

/// Drops whitespace-only lines, keeping indentation of the first line with content.
fn skip_blank_lines(mut rest: &str) -> &str {
    loop {
        match rest.find('\n') {
            Some(end) if rest[..end].trim().is_empty() => rest = &rest[end + 1..],
            Some(_) => return rest,
            None if rest.trim().is_empty() => return "",
            None => return rest,
        }
    }
}

fn split_fenced(text: &str, format: FrontmatterFormat) -> Option<Split<'_>> {
    let fence = format.fence();
    let open = fence.open.find(text)?;
    let rest = &text[open.end()..];
    let close = fence.close.find(rest)?;
    Some(Split {
        format,
        matter: &rest[..close.start()],
        body: skip_blank_lines(&rest[close.end()..]),
    })
}

/// Detects a header of one of `formats` at the start of `text`.
pub fn split_with<'a>(text: &'a str, formats: &[FrontmatterFormat]) -> Option<Split<'a>> {
    formats
        .iter()
        .find_map(|format| split_fenced(text, *format))
}

pub fn split(text: &str) -> Option<Split<'_>> {
    split_with(text, ALL_FORMATS)
}

/// Whether `text` starts with a complete header.
pub fn test(text: &str) -> bool {
    split(text).is_some()
}

/// Falsy scalars read as an empty mapping; other non-mappings are rejected.
fn into_mapping(value: Value) -> Result<Frontmatter, ErrorDetail> {
    match value {
        Value::Null | Value::Bool(false) | Value::Integer(0) => Ok(Frontmatter::new()),
        Value::Float(f) if f == 0.0 || f.is_nan() => Ok(Frontmatter::new()),
        Value::String(s) if s.is_empty() => Ok(Frontmatter::new()),
        Value::Mapping(map) => Ok(map),
        other => Err(ErrorDetail::NotAMapping {
            got: other.type_name(),
        }),
    }
}

/// Blank or comment-only content, which both formats read as an empty document.
fn is_vacant(matter: &str) -> bool {
    matter.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

impl Split<'_> {
    pub fn attributes(&self) -> Result<Frontmatter, ErrorDetail> {
        if is_vacant(self.matter) {
            return Ok(Frontmatter::new());
        }
        match self.format {
            FrontmatterFormat::Yaml => {
                let value: Value =
                    serde_yaml::from_str(self.matter).map_err(ErrorDetail::ParseYaml)?;
                into_mapping(value)
            }
            FrontmatterFormat::Toml => {
                let table: toml::Table =
                    toml::from_str(self.matter).map_err(ErrorDetail::ParseToml)?;
                into_mapping(toml::Value::Table(table).into())
            }
        }
    }
}

/// Splits and parses a header.
///
/// Text without a header, or whose header is well-formed but not a mapping,
/// yields empty attributes and the whole text as body.
pub fn parse(text: &str) -> Result<Parsed, ErrorDetail> {
    let absent = || Parsed {
        attributes: Frontmatter::new(),
        body: text.to_owned(),
        format: None,
    };
    let Some(split) = split(text) else {
        return Ok(absent());
    };
    match split.attributes() {
        Ok(attributes) => Ok(Parsed {
            attributes,
            body: split.body.to_owned(),
            format: Some(split.format),
        }),
        Err(ErrorDetail::NotAMapping { .. }) => Ok(absent()),
        Err(e) => Err(e),
    }
}
