pub mod config;
pub mod frontmatter;
pub mod mdast;
pub mod pipeline;
pub mod transform;

#[cfg(test)]
mod tests;

pub use mdast::{Code, Frontmatter, Node, NodeKind, Value};
pub use transform::{CodeFrontmatter, Transformer, code_frontmatter};

#[derive(Debug, thiserror::Error)]
#[error("{context}: {detail}")]
pub struct Error {
    pub context: Box<ErrorContext>,
    pub detail: Box<ErrorDetail>,
}

/// Locates the code block a failure belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Zero-based ordinal of the code block in document order.
    pub index: usize,
    pub lang: Option<String>,
}

impl ErrorContext {
    pub(crate) fn new(index: usize, lang: Option<String>) -> Self {
        Self { index, lang }
    }

    pub(crate) fn error(&self, detail: ErrorDetail) -> Error {
        Error {
            context: Box::new(self.clone()),
            detail: Box::new(detail),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.lang {
            Some(lang) => write!(f, "code block #{} ({lang})", self.index),
            None => write!(f, "code block #{}", self.index),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorDetail {
    #[error("Failed to parse YAML frontmatter: {0}")]
    ParseYaml(serde_yaml::Error),
    #[error("Failed to parse TOML frontmatter: {0}")]
    ParseToml(toml::de::Error),
    #[error("Frontmatter must be a mapping, got {got}")]
    NotAMapping { got: &'static str },
}
