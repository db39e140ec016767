//! The shorthand rewrite itself: classify each rule, rewrite the marked ones
//! into `var()` form and fold the result back into the tree.

pub mod classify;
pub mod merge;
pub mod prefix;
pub mod rewrite;

pub use classify::is_shorthand;
pub use prefix::generate_prefix;

use log::{debug, info};

use crate::config::Options;
use crate::error::Result;
use crate::tree::css_tree::{self, Stylesheet};
use classify::ShorthandUsage;
use merge::{MergeCursor, MergeOutcome};

/// Counters for one [`transform`] run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformReport {
    pub rules_seen: usize,
    pub rules_rewritten: usize,
    pub rules_merged: usize,
    pub declarations_rewritten: usize,
}

/// Rewrites every shorthand rule of `sheet` in place, in document order.
///
/// All rules are classified before anything is touched, so an
/// [`Error::InconsistentShorthandUsage`](crate::error::Error::InconsistentShorthandUsage)
/// leaves the tree exactly as it was.
pub fn transform(sheet: &Stylesheet, options: &Options) -> Result<TransformReport> {
    let rules = css_tree::collect_rules(&sheet.root);

    let mut usages = Vec::with_capacity(rules.len());
    for rule in &rules {
        let node = rule.borrow();
        let selectors = node
            .as_rule()
            .map(|rule| rule.selectors.as_slice())
            .unwrap_or_default();
        usages.push(classify::classify(selectors)?);
    }

    let mut report = TransformReport {
        rules_seen: rules.len(),
        ..TransformReport::default()
    };
    let mut cursor = MergeCursor::new();

    for (rule, usage) in rules.iter().zip(usages) {
        if usage == ShorthandUsage::None {
            cursor.set(rule);
            continue;
        }

        let rewritten = {
            let mut node = rule.borrow_mut();
            match node.as_rule_mut() {
                Some(rule_node) => rewrite::rewrite_rule(rule_node, options),
                None => continue,
            }
        };
        debug!(
            "rewrote `{}` into {} bucket(s)",
            rewritten.joined_target(),
            rewritten.bucket_rules.len()
        );
        report.rules_rewritten += 1;
        report.declarations_rewritten += rewritten.declaration_count();

        if merge::merge_or_replace(rule, rewritten, &mut cursor) == MergeOutcome::Merged {
            report.rules_merged += 1;
        }
    }

    info!(
        "rewrote {} of {} rule(s), {} merged, {} declaration(s)",
        report.rules_rewritten, report.rules_seen, report.rules_merged, report.declarations_rewritten
    );
    Ok(report)
}
