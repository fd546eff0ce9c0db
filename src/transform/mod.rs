use tracing::{debug, trace, warn};

use crate::{
    Error, ErrorContext, ErrorDetail,
    config::{ExtractConfig, OnInvalid},
    frontmatter,
    mdast::{self, Code, Node},
};

/// A pipeline stage rewriting a tree in place.
pub trait Transformer {
    fn transform(&self, tree: &mut Node) -> Result<(), Error>;
}

impl<F> Transformer for F
where
    F: Fn(&mut Node) -> Result<(), Error>,
{
    fn transform(&self, tree: &mut Node) -> Result<(), Error> {
        self(tree)
    }
}

/// Moves a leading frontmatter header of every code block into [`Code::frontmatter`].
#[derive(Debug, Clone, Default)]
pub struct CodeFrontmatter {
    config: ExtractConfig,
}

pub fn code_frontmatter() -> CodeFrontmatter {
    CodeFrontmatter::default()
}

impl CodeFrontmatter {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    fn extract(&self, index: usize, code: &mut Code) -> Result<(), ErrorDetail> {
        let Some(split) = frontmatter::split_with(&code.value, &self.config.formats) else {
            trace!(index, lang = ?code.lang, "no frontmatter in code block");
            return Ok(());
        };
        let attributes = match split.attributes() {
            Ok(attributes) => attributes,
            Err(e @ ErrorDetail::NotAMapping { .. }) => {
                warn!(index, lang = ?code.lang, %e, "leaving code block with non-mapping header in place");
                return Ok(());
            }
            Err(e) if self.config.on_invalid == OnInvalid::Ignore => {
                warn!(index, lang = ?code.lang, %e, "ignoring invalid code block frontmatter");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        debug!(
            index,
            lang = ?code.lang,
            format = ?split.format,
            keys = attributes.len(),
            "extracted code block frontmatter"
        );
        let body = split.body.to_owned();
        code.value = body;
        code.frontmatter = Some(attributes);
        Ok(())
    }
}

impl Transformer for CodeFrontmatter {
    fn transform(&self, tree: &mut Node) -> Result<(), Error> {
        let mut index = 0;
        mdast::try_visit_code_mut(tree, |code| {
            let current = index;
            index += 1;
            self.extract(current, code)
                .map_err(|detail| ErrorContext::new(current, code.lang.clone()).error(detail))
        })
    }
}
