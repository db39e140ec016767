use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Which prefix comes first in a generated custom property name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrefixOrder {
    /// `--<media>--<selector>`
    #[default]
    ContextFirst,
    /// `--<selector>--<media>`
    SelectorFirst,
}

impl PrefixOrder {
    /// Concatenates both fragments in this order. Both are already `--` prefixed
    /// (or empty), so no separator is inserted.
    pub fn combine(self, context_prefix: &str, selector_prefix: &str) -> String {
        match self {
            PrefixOrder::ContextFirst => format!("{}{}", context_prefix, selector_prefix),
            PrefixOrder::SelectorFirst => format!("{}{}", selector_prefix, context_prefix),
        }
    }
}

/// Maps raw `@media` params to the text used for the prefix instead.
/// Lookups are exact: no whitespace or case normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable(HashMap<String, String>);

impl AliasTable {
    pub fn new() -> Self {
        AliasTable(HashMap::new())
    }

    pub fn insert(&mut self, raw: impl Into<String>, replacement: impl Into<String>) {
        self.0.insert(raw.into(), replacement.into());
    }

    /// Returns the alias registered for `raw`, or `raw` itself.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.0.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AliasTable(
            iter.into_iter()
                .map(|(raw, replacement)| (raw.into(), replacement.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for AliasTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (raw, replacement) in iter {
            self.insert(raw, replacement);
        }
    }
}

/// Transform configuration, normally supplied by the host pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub prefix_order: PrefixOrder,
    pub aliases: AliasTable,
}

/// On-disk shape. Accepts both the current keys and the older
/// `mediaQueryAtStart` / `mediaQueryAliases` pair.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    #[serde(default)]
    prefix_order: Option<PrefixOrder>,
    #[serde(default, alias = "mediaQueryAliases")]
    aliases: AliasTable,
    #[serde(default)]
    media_query_at_start: Option<bool>,
}

impl From<RawOptions> for Options {
    fn from(raw: RawOptions) -> Self {
        let prefix_order = match raw.media_query_at_start {
            Some(true) => PrefixOrder::ContextFirst,
            Some(false) => PrefixOrder::SelectorFirst,
            None => raw.prefix_order.unwrap_or_default(),
        };
        Options {
            prefix_order,
            aliases: raw.aliases,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix_order(mut self, prefix_order: PrefixOrder) -> Self {
        self.prefix_order = prefix_order;
        self
    }

    pub fn with_alias(mut self, raw: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.aliases.insert(raw, replacement);
        self
    }

    /// Parses a JSON object such as
    /// `{"prefixOrder": "selectorFirst", "aliases": {"print": "p"}}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawOptions = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
