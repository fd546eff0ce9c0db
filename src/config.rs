use serde::Deserialize;

use crate::frontmatter::{ALL_FORMATS, FrontmatterFormat};

/// What to do with a header that is detected but cannot be parsed into a mapping.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OnInvalid {
    /// Abort the transform with an error.
    #[default]
    Error,
    /// Leave the code block untouched and log a warning.
    Ignore,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    pub formats: Vec<FrontmatterFormat>,
    pub on_invalid: OnInvalid,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            formats: ALL_FORMATS.to_vec(),
            on_invalid: OnInvalid::default(),
        }
    }
}

impl ExtractConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.formats.is_empty() {
            return Err("at least one frontmatter format must be enabled".to_owned());
        }
        Ok(())
    }
}
