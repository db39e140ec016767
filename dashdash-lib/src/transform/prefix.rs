//! Custom property name prefixes: one derived from the rule's own selector, one
//! from the nearest enclosing `@media` block.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AliasTable;
use crate::tree::css_tree::{Node, RuleNode};

/// Marker asking for the selector prefix to be generated from the selector.
pub const GENERATE_FLAG: &str = "_--";

static PSEUDO_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"::?[[:word:]]+(-[[:word:]]+)*").expect("pseudo suffix pattern compiles")
});

static NON_NAME_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^[:word:]-]+").expect("name run pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPrefix {
    /// `_--`: build a prefix per target selector with [`generate_prefix`].
    Generate,
    /// `--name--`: the same prefix for every target selector.
    Explicit(String),
}

impl SelectorPrefix {
    /// Reads the prefix request off the last compound of `first_selector`.
    pub fn resolve(first_selector: &str) -> Self {
        let last = last_part(first_selector);
        if strip_pseudo(last) == GENERATE_FLAG {
            SelectorPrefix::Generate
        } else {
            SelectorPrefix::Explicit(explicit_prefix(last))
        }
    }

    /// Prefix for one bucket, keyed by its target selector.
    pub fn for_target(&self, target_key: &str) -> String {
        match self {
            SelectorPrefix::Generate => generate_prefix(target_key),
            SelectorPrefix::Explicit(prefix) => prefix.clone(),
        }
    }
}

/// Text after the last descendant-combinator space.
pub fn last_part(selector: &str) -> &str {
    selector.rsplit(' ').next().unwrap_or(selector)
}

/// Removes every `:pseudo` / `::pseudo` suffix.
pub fn strip_pseudo(part: &str) -> String {
    PSEUDO_SUFFIX.replace_all(part, "").into_owned()
}

/// `--accent--` becomes `--accent-`: colons and underscores go, and the closing
/// `--` of the marker is cut down to a single dash.
pub fn explicit_prefix(last_part: &str) -> String {
    let mut prefix: String = last_part
        .chars()
        .filter(|c| *c != ':' && *c != '_')
        .collect();
    if prefix.ends_with("--") {
        prefix.pop();
    }
    prefix
}

/// Turns any selector (or media query) into a `--`-prefixed name fragment.
///
/// Drops the first `_--`, collapses every run of characters that are neither
/// word characters nor dashes into `--`, trims dashes from both ends and
/// prepends `--`.
///
/// ```
/// use dashdash_lib::transform::prefix::generate_prefix;
///
/// assert_eq!(generate_prefix(".Card.Header _--"), "--Card--Header");
/// assert_eq!(generate_prefix("(min-width: 768px)"), "--min-width--768px");
/// ```
pub fn generate_prefix(selector: &str) -> String {
    let without_flag = selector.replacen(GENERATE_FLAG, "", 1);
    let dashed = NON_NAME_RUN.replace_all(&without_flag, "--");
    format!("--{}", dashed.trim_matches('-'))
}

/// Prefix from the nearest `@media` ancestor of `rule`, after alias
/// substitution. Empty when there is none. Outer `@media` blocks are not
/// consulted.
pub fn media_prefix(rule: &RuleNode, aliases: &AliasTable) -> String {
    let mut current = rule.parent();

    while let Some(node) = current {
        let next = {
            let borrowed = node.borrow();
            if let Node::AtRule(at_rule) = &*borrowed {
                if at_rule.is_media() {
                    let params = aliases.resolve(&at_rule.params);
                    let prefix = generate_prefix(params);
                    trace!("media `{}` resolved to prefix `{}`", at_rule.params, prefix);
                    return prefix;
                }
            }
            borrowed.parent()
        };
        current = next;
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::css_tree::{self, AtRuleNode, NodeRef};
    use std::rc::Rc;

    fn at_rule(name: &str, params: &str) -> NodeRef {
        css_tree::new_node(Node::AtRule(AtRuleNode::new(name, params, true)))
    }

    fn attach_rule(parent: &NodeRef) -> NodeRef {
        let rule = css_tree::new_node(Node::Rule(RuleNode::new(vec![".a _--".into()])));
        css_tree::append_child(parent, Rc::clone(&rule));
        rule
    }

    fn media_prefix_of(rule: &NodeRef, aliases: &AliasTable) -> String {
        let node = rule.borrow();
        media_prefix(node.as_rule().unwrap(), aliases)
    }

    #[test]
    fn test_last_part() {
        assert_eq!(last_part(".Card.Header _--"), "_--");
        assert_eq!(last_part(".a .b --x--:hover"), "--x--:hover");
        assert_eq!(last_part("_--"), "_--");
    }

    #[test]
    fn test_strip_pseudo() {
        assert_eq!(strip_pseudo("_--:hover"), "_--");
        assert_eq!(strip_pseudo("--x--::first-line"), "--x--");
        assert_eq!(strip_pseudo("_--"), "_--");
    }

    #[test]
    fn test_resolve_generate() {
        assert_eq!(SelectorPrefix::resolve(".Card.Header _--"), SelectorPrefix::Generate);
        assert_eq!(SelectorPrefix::resolve(".btn _--:hover"), SelectorPrefix::Generate);
    }

    #[test]
    fn test_resolve_explicit() {
        assert_eq!(
            SelectorPrefix::resolve(".btn --accent--"),
            SelectorPrefix::Explicit("--accent-".into())
        );
        assert_eq!(
            SelectorPrefix::resolve(".btn _--primary--"),
            SelectorPrefix::Explicit("--primary-".into())
        );
        assert_eq!(
            SelectorPrefix::resolve(".btn --accent--:hover"),
            SelectorPrefix::Explicit("--accent--hover".into())
        );
    }

    #[test]
    fn test_generate_prefix() {
        assert_eq!(generate_prefix(".Card.Header "), "--Card--Header");
        assert_eq!(generate_prefix("#main > .nav-item"), "--main--nav-item");
        assert_eq!(generate_prefix(".btn:hover"), "--btn--hover");
        assert_eq!(generate_prefix("print"), "--print");
        assert_eq!(generate_prefix("_--"), "--");
        assert_eq!(generate_prefix(".a _-- _--"), "--a--_");
    }

    #[test]
    fn test_media_prefix_without_media() {
        let sheet = css_tree::new_stylesheet();
        let rule = attach_rule(&sheet.root);
        assert_eq!(media_prefix_of(&rule, &AliasTable::new()), "");
    }

    #[test]
    fn test_media_prefix_with_alias() {
        let sheet = css_tree::new_stylesheet();
        let media = at_rule("media", "(min-width: 768px)");
        css_tree::append_child(&sheet.root, Rc::clone(&media));
        let rule = attach_rule(&media);

        let aliases: AliasTable = [("(min-width: 768px)", "tablet")].into_iter().collect();
        assert_eq!(media_prefix_of(&rule, &aliases), "--tablet");
        assert_eq!(
            media_prefix_of(&rule, &AliasTable::new()),
            "--min-width--768px"
        );
    }

    #[test]
    fn test_media_prefix_skips_other_at_rules() {
        let sheet = css_tree::new_stylesheet();
        let media = at_rule("media", "print");
        let supports = at_rule("supports", "(display: grid)");
        css_tree::append_child(&sheet.root, Rc::clone(&media));
        css_tree::append_child(&media, Rc::clone(&supports));
        let rule = attach_rule(&supports);

        assert_eq!(media_prefix_of(&rule, &AliasTable::new()), "--print");
    }

    #[test]
    fn test_media_prefix_uses_nearest_media_only() {
        let sheet = css_tree::new_stylesheet();
        let outer = at_rule("media", "screen");
        let inner = at_rule("media", "(max-width: 480px)");
        css_tree::append_child(&sheet.root, Rc::clone(&outer));
        css_tree::append_child(&outer, Rc::clone(&inner));
        let rule = attach_rule(&inner);

        assert_eq!(
            media_prefix_of(&rule, &AliasTable::new()),
            "--max-width--480px"
        );
    }
}
