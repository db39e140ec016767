use log::{debug, warn};
use std::rc::Rc;

use super::rewrite::RewrittenRule;
use crate::tree::css_tree::{self, Node, NodeRef, RuleNode};

/// The one rule the next rewritten rule may be folded into.
#[derive(Debug, Default)]
pub struct MergeCursor {
    previous: Option<NodeRef>,
}

impl MergeCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, rule: &NodeRef) {
        self.previous = Some(Rc::clone(rule));
    }

    pub fn previous(&self) -> Option<&NodeRef> {
        self.previous.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Declarations were appended to the previous rule; the source rule is gone.
    Merged,
    /// A new rule took the source rule's place and became the cursor.
    Replaced,
    /// The source rule was no longer attached to the tree.
    Detached,
}

/// Places the output of [`super::rewrite::rewrite_rule`] in the tree.
///
/// When the cursor rule shares `rule`'s parent and its selector list equals
/// the rewritten target list, the new declarations are appended to it and
/// `rule` is removed. Otherwise `rule` is replaced by a fresh rule carrying the
/// target selectors, which becomes the new cursor.
pub fn merge_or_replace(
    rule: &NodeRef,
    rewritten: RewrittenRule,
    cursor: &mut MergeCursor,
) -> MergeOutcome {
    let target = rewritten.joined_target();

    if let Some(previous) = cursor.previous() {
        if is_merge_target(previous, rule, &target) {
            debug!("merging `{}` into the previous rule", target);
            let declarations = rewritten.into_declarations();
            if let Node::Rule(previous_rule) = &mut *previous.borrow_mut() {
                previous_rule.declarations.extend(declarations);
            }
            css_tree::detach(rule);
            return MergeOutcome::Merged;
        }
    }

    let selectors = rewritten.target_selectors.clone();
    let replacement = RuleNode::new(selectors).with_declarations(rewritten.into_declarations());
    match css_tree::replace_node(rule, Node::Rule(replacement)) {
        Some(inserted) => {
            debug!("replaced shorthand rule with `{}`", target);
            cursor.set(&inserted);
            MergeOutcome::Replaced
        }
        None => {
            warn!("shorthand rule `{}` is not attached to a stylesheet", target);
            MergeOutcome::Detached
        }
    }
}

fn is_merge_target(previous: &NodeRef, rule: &NodeRef, target: &str) -> bool {
    if Rc::ptr_eq(previous, rule) || !css_tree::same_parent(previous, rule) {
        return false;
    }
    previous
        .borrow()
        .as_rule()
        .is_some_and(|previous_rule| previous_rule.joined_selectors() == target)
}
