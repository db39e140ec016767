use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet as LightningStyleSheet};
use std::fmt;

use crate::error::{Error, Result};
use crate::tree::css_tree::{AtRuleNode, Declaration, Node, NodeRef, RuleNode, Stylesheet};

const INDENT: &str = "  ";

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root.borrow();
        let Some(children) = root.children() else {
            return Ok(());
        };
        for (index, child) in children.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write_node(f, child, 0)?;
        }
        Ok(())
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            write!(f, " !important")?;
        }
        Ok(())
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &NodeRef, depth: usize) -> fmt::Result {
    match &*node.borrow() {
        Node::Root(root) => {
            for child in &root.children {
                write_node(f, child, depth)?;
            }
            Ok(())
        }
        Node::AtRule(at_rule) => write_at_rule(f, at_rule, depth),
        Node::Rule(rule) => write_rule(f, rule, depth),
    }
}

fn write_rule(f: &mut fmt::Formatter<'_>, rule: &RuleNode, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    let selectors = rule.selectors.join(", ");
    if rule.declarations.is_empty() {
        return writeln!(f, "{}{} {{}}", indent, selectors);
    }
    writeln!(f, "{}{} {{", indent, selectors)?;
    write_declarations(f, &rule.declarations, depth + 1)?;
    writeln!(f, "{}}}", indent)
}

fn write_at_rule(f: &mut fmt::Formatter<'_>, at_rule: &AtRuleNode, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    write!(f, "{}@{}", indent, at_rule.name)?;
    if !at_rule.params.is_empty() {
        write!(f, " {}", at_rule.params)?;
    }
    if !at_rule.has_block {
        return writeln!(f, ";");
    }

    writeln!(f, " {{")?;
    write_declarations(f, &at_rule.declarations, depth + 1)?;
    for child in &at_rule.children {
        write_node(f, child, depth + 1)?;
    }
    writeln!(f, "{}}}", indent)
}

fn write_declarations(
    f: &mut fmt::Formatter<'_>,
    declarations: &[Declaration],
    depth: usize,
) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    for declaration in declarations {
        writeln!(f, "{}{};", indent, declaration)?;
    }
    Ok(())
}

/// Pretty-prints the tree back to CSS text.
pub fn to_css(sheet: &Stylesheet) -> String {
    sheet.to_string()
}

/// Re-parses already rewritten CSS with LightningCSS and prints it minified.
/// Only valid CSS gets this far: shorthand markers must be gone by now.
pub fn minify(css: &str) -> Result<String> {
    let mut sheet = LightningStyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| Error::Minify(e.to_string()))?;
    sheet
        .minify(MinifyOptions::default())
        .map_err(|e| Error::Minify(e.to_string()))?;
    let output = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| Error::Minify(e.to_string()))?;
    Ok(output.code)
}
