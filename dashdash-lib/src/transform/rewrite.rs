use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use super::prefix::{self, SelectorPrefix, GENERATE_FLAG};
use crate::config::Options;
use crate::tree::css_tree::{Declaration, RuleNode};

static EXPLICIT_NAME_REGION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--.*--").expect("explicit name pattern compiles"));

/// Key under which a selector's declarations are bucketed.
///
/// `.a _--:hover` becomes `.a:hover`; `.btn --accent--` becomes `.btn ` (the
/// trailing space stays).
pub fn target_key(selector: &str) -> String {
    let without_flag = selector.replacen(GENERATE_FLAG, "", 1);
    EXPLICIT_NAME_REGION
        .replace(&without_flag, "")
        .replace(" :", ":")
}

/// Selector the rewritten rule ends up with: `selector` minus
/// `" " + marker`, where `marker` is the pseudo-stripped last part of the
/// rule's first selector. A pseudo suffix on the marker is kept.
pub fn final_target_selector(selector: &str, marker: &str) -> String {
    selector.replacen(&format!(" {}", marker), "", 1)
}

/// `var(<prefix>--<property>, <original value>)`, `!important` untouched.
pub fn wrap_in_var(combined_prefix: &str, declaration: &Declaration) -> Declaration {
    Declaration {
        property: declaration.property.clone(),
        value: format!(
            "var({}--{}, {})",
            combined_prefix, declaration.property, declaration.value
        ),
        important: declaration.important,
    }
}

/// Declarations grouped by target key, in first-seen key order.
#[derive(Debug, Default)]
pub struct Buckets {
    entries: Vec<(String, Vec<Declaration>)>,
}

impl Buckets {
    pub fn with_keys<I: IntoIterator<Item = String>>(keys: I) -> Self {
        let mut buckets = Buckets::default();
        for key in keys {
            if !buckets.entries.iter().any(|(existing, _)| *existing == key) {
                buckets.entries.push((key, Vec::new()));
            }
        }
        buckets
    }

    /// Every selector of a rule shares its declarations, so each one lands in
    /// every bucket.
    pub fn push_to_all(&mut self, declaration: &Declaration) {
        for (_, declarations) in &mut self.entries {
            declarations.push(declaration.clone());
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl IntoIterator for Buckets {
    type Item = (String, Vec<Declaration>);
    type IntoIter = std::vec::IntoIter<(String, Vec<Declaration>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Output of rewriting one shorthand rule, not yet placed in the tree.
#[derive(Debug, Default)]
pub struct RewrittenRule {
    /// What the merge step compares against the previous rule.
    pub target_selectors: Vec<String>,
    /// One detached rule per bucket, selector = bucket key.
    pub bucket_rules: Vec<RuleNode>,
}

impl RewrittenRule {
    pub fn joined_target(&self) -> String {
        self.target_selectors.join(",")
    }

    pub fn declaration_count(&self) -> usize {
        self.bucket_rules
            .iter()
            .map(|rule| rule.declarations.len())
            .sum()
    }

    /// All rewritten declarations, bucket by bucket.
    pub fn into_declarations(self) -> Vec<Declaration> {
        self.bucket_rules
            .into_iter()
            .flat_map(|rule| rule.declarations)
            .collect()
    }
}

/// Moves the declarations out of `rule` and rewrites them into `var()` form.
/// `rule` is left with its selectors and no declarations.
pub fn rewrite_rule(rule: &mut RuleNode, options: &Options) -> RewrittenRule {
    let Some(first) = rule.selectors.first() else {
        return RewrittenRule::default();
    };

    let selector_prefix = SelectorPrefix::resolve(first);
    let marker = prefix::strip_pseudo(prefix::last_part(first));
    let context_prefix = prefix::media_prefix(rule, &options.aliases);

    let mut buckets = Buckets::with_keys(rule.selectors.iter().map(|s| target_key(s)));
    for declaration in std::mem::take(&mut rule.declarations) {
        buckets.push_to_all(&declaration);
    }

    let bucket_rules = buckets
        .into_iter()
        .map(|(key, declarations)| {
            let selector_part = selector_prefix.for_target(&key);
            let combined = options
                .prefix_order
                .combine(&context_prefix, &selector_part);
            trace!("bucket `{}` uses prefix `{}`", key, combined);

            let rewritten = declarations
                .iter()
                .map(|declaration| wrap_in_var(&combined, declaration))
                .collect();
            RuleNode::new(vec![key]).with_declarations(rewritten)
        })
        .collect();

    let target_selectors = rule
        .selectors
        .iter()
        .map(|selector| final_target_selector(selector, &marker))
        .collect();

    RewrittenRule {
        target_selectors,
        bucket_rules,
    }
}
