//! Reads stylesheet text into the owned [`css_tree`] representation.
//!
//! Built on `cssparser` for tokenizing. Every prelude and value is kept as raw
//! source text: selectors carrying `_--` / `--name--` markers are not
//! valid CSS selectors, and `@media` params must stay byte-identical so alias
//! lookups match what the stylesheet author wrote.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use crate::error::{Error, Result};
use crate::tree::css_tree::{self, AtRuleNode, Declaration, Node, NodeRef, RuleNode, Stylesheet};

/// At-rules whose block is a declaration list rather than a rule list.
const DECLARATION_AT_RULES: &[&str] = &[
    "font-face",
    "page",
    "counter-style",
    "property",
    "font-palette-values",
    "viewport",
];

/// Parses `css` into a fresh stylesheet tree.
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet> {
    let sheet = css_tree::new_stylesheet();
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut builder = TreeBuilder;

    for item in cssparser::StyleSheetParser::new(&mut parser, &mut builder) {
        match item {
            Ok(node) => css_tree::append_child(&sheet.root, node),
            Err((error, slice)) => {
                return Err(Error::Parse {
                    line: error.location.line + 1,
                    column: error.location.column,
                    message: format!("{:?} near `{}`", error.kind, slice.trim()),
                });
            }
        }
    }

    Ok(sheet)
}

struct TreeBuilder;

impl<'i> QualifiedRuleParser<'i> for TreeBuilder {
    type Prelude = Vec<String>;
    type QualifiedRule = NodeRef;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let selectors = split_selector_list(input);
        if selectors.is_empty() {
            return Err(input.new_custom_error::<(), ()>(()));
        }
        Ok(selectors)
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let declarations = parse_declaration_list(input)?;
        Ok(css_tree::new_node(Node::Rule(
            RuleNode::new(selectors).with_declarations(declarations),
        )))
    }
}

impl<'i> AtRuleParser<'i> for TreeBuilder {
    type Prelude = (String, String);
    type AtRule = NodeRef;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let params = input.slice_from(start).trim().to_string();
        Ok((name.as_ref().to_string(), params))
    }

    fn rule_without_block(
        &mut self,
        (name, params): Self::Prelude,
        _start: &ParserState,
    ) -> std::result::Result<Self::AtRule, ()> {
        Ok(css_tree::new_node(Node::AtRule(AtRuleNode::new(
            name, params, false,
        ))))
    }

    fn parse_block<'t>(
        &mut self,
        (name, params): Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let holds_declarations = DECLARATION_AT_RULES
            .iter()
            .any(|candidate| name.eq_ignore_ascii_case(candidate));

        let mut at_rule = AtRuleNode::new(name, params, true);
        if holds_declarations {
            at_rule.declarations = parse_declaration_list(input)?;
            return Ok(css_tree::new_node(Node::AtRule(at_rule)));
        }

        let node = css_tree::new_node(Node::AtRule(at_rule));
        let nested = cssparser::StyleSheetParser::new(input, self);
        for item in nested {
            match item {
                Ok(child) => css_tree::append_child(&node, child),
                Err((error, _)) => return Err(error),
            }
        }
        Ok(node)
    }
}

/// Splits a rule prelude on top-level commas. Commas nested in functions or
/// brackets (`:is(.a, .b)`) stay inside their selector.
fn split_selector_list<'i, 't>(input: &mut Parser<'i, 't>) -> Vec<String> {
    let mut selectors = Vec::new();
    let mut start = input.position();

    loop {
        let before = input.position();
        let at_comma = match input.next_including_whitespace_and_comments() {
            Ok(token) => matches!(token, Token::Comma),
            Err(_) => break,
        };
        if at_comma {
            push_trimmed(&mut selectors, input.slice(start..before));
            start = input.position();
        }
    }
    push_trimmed(&mut selectors, input.slice_from(start));

    selectors
}

fn push_trimmed(selectors: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        selectors.push(trimmed.to_string());
    }
}

/// Collects the declarations of a block. Anything else in the block (nested
/// rules, at-rules, malformed declarations) fails the whole parse.
fn parse_declaration_list<'i, 't>(
    input: &mut Parser<'i, 't>,
) -> std::result::Result<Vec<Declaration>, ParseError<'i, ()>> {
    let mut collector = DeclarationCollector;
    let mut declarations = Vec::new();

    for item in RuleBodyParser::new(input, &mut collector) {
        match item {
            Ok(declaration) => declarations.push(declaration),
            Err((error, _)) => return Err(error),
        }
    }

    Ok(declarations)
}

/// Raw value text with comments cut out. Comments inside function arguments
/// are left alone.
fn value_without_comments<'i, 't>(input: &mut Parser<'i, 't>) -> String {
    let mut value = String::new();
    let mut start = input.position();

    loop {
        let before = input.position();
        let at_comment = match input.next_including_whitespace_and_comments() {
            Ok(token) => matches!(token, Token::Comment(_)),
            Err(_) => break,
        };
        if at_comment {
            value.push_str(input.slice(start..before));
            start = input.position();
        }
    }
    value.push_str(input.slice_from(start));

    value
}

/// Splits a trailing `!important` off a raw value.
fn split_important(raw: &str) -> (&str, bool) {
    if let Some(bang) = raw.rfind('!') {
        if raw[bang + 1..].trim().eq_ignore_ascii_case("important") {
            return (raw[..bang].trim_end(), true);
        }
    }
    (raw, false)
}

struct DeclarationCollector;

impl<'i> DeclarationParser<'i> for DeclarationCollector {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let raw = value_without_comments(input);
        let (value, important) = split_important(raw.trim());
        Ok(Declaration::new(name.as_ref(), value).important(important))
    }
}

impl<'i> AtRuleParser<'i> for DeclarationCollector {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationCollector {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for DeclarationCollector {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
