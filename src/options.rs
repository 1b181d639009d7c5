//! Parser configuration.

use url::Url;

use crate::backcompat::Backcompat;
use crate::error::{Error, Result};

/// Nesting depth past which subtrees are skipped.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for one parse call.
///
/// ```
/// use mf2::ParseOptions;
///
/// let options = ParseOptions::new()
///     .with_base_url("https://example.com/notes/1")
///     .unwrap()
///     .with_max_depth(64);
/// assert_eq!(options.base_url().unwrap().host_str(), Some("example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct ParseOptions {
    base_url: Option<Url>,
    backcompat: Backcompat,
    max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            backcompat: Backcompat::standard(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Standard backcompat table, no base URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative URLs against `url`.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|source| Error::InvalidBaseUrl {
            url: url.to_string(),
            source,
        })?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    pub fn with_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn with_backcompat(mut self, backcompat: Backcompat) -> Self {
        self.backcompat = backcompat;
        self
    }

    /// Ignore legacy classnames entirely.
    pub fn without_backcompat(self) -> Self {
        self.with_backcompat(Backcompat::empty())
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn backcompat(&self) -> &Backcompat {
        &self.backcompat
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
