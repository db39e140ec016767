use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// `[leading part + space] [_]-- [name--]* [:pseudo | ::pseudo]`
static SHORTHAND_SELECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+ )?_?--([[:word:]]+(-[[:word:]]+)*--)*(::?[[:word:]]+(-[[:word:]]+)*)?$")
        .expect("shorthand selector pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShorthandUsage {
    /// No selector carries a marker; the rule is left alone.
    None,
    /// Every selector carries a marker (or the rule has a single, marked selector).
    Consistent,
}

pub fn is_shorthand(selector: &str) -> bool {
    SHORTHAND_SELECTOR.is_match(selector)
}

/// Decides whether a rule's selector list is to be rewritten.
///
/// A list where only some selectors are marked cannot be rewritten without
/// mixing raw and `var()`-wrapped values, so it fails the whole transform.
pub fn classify(selectors: &[String]) -> Result<ShorthandUsage> {
    let marked = selectors.iter().filter(|selector| is_shorthand(selector)).count();

    if marked == 0 {
        return Ok(ShorthandUsage::None);
    }
    if selectors.len() > 1 && marked < selectors.len() {
        return Err(Error::InconsistentShorthandUsage {
            selectors: selectors.join(", "),
        });
    }
    Ok(ShorthandUsage::Consistent)
}
