//! Page URL templates
//!
//! A listing URL template carries exactly one page placeholder, written either
//! as `{page}` or `{{ page }}`. Rendering substitutes a 1-based page index.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

/// Regex for the page placeholder: `{{ page }}` or `{page}`
static PAGE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*page\s*\}\}|\{\s*page\s*\}").expect("page placeholder regex is valid")
});

/// A URL template with a single page substitution point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrlTemplate {
    /// Text before the placeholder
    prefix: String,
    /// Text after the placeholder
    suffix: String,
    /// Original template text
    raw: String,
}

impl PageUrlTemplate {
    /// Parse and validate a template.
    ///
    /// Fails unless the template has exactly one page placeholder and
    /// renders to an absolute http(s) URL.
    pub fn parse(template: &str) -> Result<Self> {
        let matches: Vec<_> = PAGE_PLACEHOLDER.find_iter(template).collect();

        let placeholder = match matches.as_slice() {
            [single] => *single,
            [] => {
                return Err(Error::template(format!(
                    "URL template '{template}' has no page placeholder (use {{page}})"
                )))
            }
            many => {
                return Err(Error::template(format!(
                    "URL template '{template}' has {} page placeholders, expected exactly one",
                    many.len()
                )))
            }
        };

        let parsed = Self {
            prefix: template[..placeholder.start()].to_string(),
            suffix: template[placeholder.end()..].to_string(),
            raw: template.to_string(),
        };

        let first = Url::parse(&parsed.render(1))?;
        if !matches!(first.scheme(), "http" | "https") {
            return Err(Error::template(format!(
                "URL template '{template}' must use http or https, got '{}'",
                first.scheme()
            )));
        }

        Ok(parsed)
    }

    /// Render the URL for a 1-based page index
    pub fn render(&self, page: u32) -> String {
        format!("{}{page}{}", self.prefix, self.suffix)
    }

    /// The template as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for PageUrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
