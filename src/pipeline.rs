//! Minimal host pipeline: parse markdown, run transforms in order, render.

use crate::{
    Error,
    mdast::{self, Node},
    transform::Transformer,
};

#[derive(Default)]
pub struct Processor {
    transformers: Vec<Box<dyn Transformer>>,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage; stages run in the order they were added.
    pub fn with(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }

    pub fn run(&self, tree: &mut Node) -> Result<(), Error> {
        for transformer in &self.transformers {
            transformer.transform(tree)?;
        }
        Ok(())
    }

    pub fn process(&self, src: &str) -> Result<Node, Error> {
        let mut tree = mdast::parse(src);
        self.run(&mut tree)?;
        Ok(tree)
    }

    pub fn process_to_html(&self, src: &str) -> Result<String, Error> {
        self.process(src).map(|tree| mdast::to_html(&tree))
    }
}
