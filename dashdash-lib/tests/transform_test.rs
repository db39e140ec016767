use dashdash_lib::parser::parse_stylesheet;
use dashdash_lib::serialize::to_css;
use dashdash_lib::tree::css_tree;
use dashdash_lib::{transform, Error, Options, PrefixOrder, TransformReport};

#[cfg(test)]
pub mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rewrite(css: &str, options: &Options) -> String {
        let sheet = parse_stylesheet(css).expect("test stylesheet parses");
        transform(&sheet, options).expect("transform succeeds");
        to_css(&sheet)
    }

    fn rewrite_default(css: &str) -> String {
        rewrite(css, &Options::default())
    }

    #[test]
    fn test_plain_rules_are_untouched() {
        let css = ".a, .b {\n  color: red;\n}\n\n.block--modifier {\n  margin: 0;\n}\n";
        assert_eq!(rewrite_default(css), css);
    }

    #[test]
    fn test_partial_shorthand_aborts_without_mutation() {
        let sheet = parse_stylesheet(
            ".ok _-- { color: green; }\n.a --x--, .b { color: red; }",
        )
        .unwrap();
        let before = to_css(&sheet);

        let err = transform(&sheet, &Options::default()).unwrap_err();

        assert!(matches!(err, Error::InconsistentShorthandUsage { .. }));
        assert_eq!(to_css(&sheet), before);
    }

    #[test]
    fn test_generated_prefix_without_media() {
        assert_eq!(
            rewrite_default(".Card.Header _-- { color: red; }"),
            ".Card.Header {\n  color: var(--Card--Header--color, red);\n}\n"
        );
    }

    #[test]
    fn test_explicit_prefix_with_aliased_media() {
        let options = Options::default().with_alias("(min-width: 768px)", "tablet");
        assert_eq!(
            rewrite(
                "@media (min-width: 768px) { .btn --accent-- { color: blue; } }",
                &options
            ),
            "@media (min-width: 768px) {\n  .btn {\n    color: var(--tablet--accent---color, blue);\n  }\n}\n"
        );
    }

    #[test]
    fn test_media_without_alias_is_normalized() {
        assert_eq!(
            rewrite_default("@media (max-width: 480px) { .card _-- { padding: 4px; } }"),
            "@media (max-width: 480px) {\n  .card {\n    padding: var(--max-width--480px--card--padding, 4px);\n  }\n}\n"
        );
    }

    #[test]
    fn test_alias_lookup_is_exact() {
        let options = Options::default().with_alias("(min-width: 768px)", "tablet");
        assert_eq!(
            rewrite("@media (min-width:768px) { .card _-- { color: red; } }", &options),
            "@media (min-width:768px) {\n  .card {\n    color: var(--min-width--768px--card--color, red);\n  }\n}\n"
        );
    }

    #[test]
    fn test_selector_first_order() {
        let options = Options::default()
            .with_prefix_order(PrefixOrder::SelectorFirst)
            .with_alias("print", "paper");
        assert_eq!(
            rewrite("@media print { .card _-- { color: black; } }", &options),
            "@media print {\n  .card {\n    color: var(--card--paper--color, black);\n  }\n}\n"
        );
    }

    #[test]
    fn test_no_media_means_selector_prefix_only() {
        assert_eq!(
            rewrite_default(".btn --brand-- { color: red; }"),
            ".btn {\n  color: var(--brand---color, red);\n}\n"
        );
    }

    #[test]
    fn test_merges_into_plain_previous_rule() {
        assert_eq!(
            rewrite_default(".x { color: red; }\n.x _-- { background: blue; }"),
            ".x {\n  color: red;\n  background: var(--x--background, blue);\n}\n"
        );
    }

    #[test]
    fn test_merges_consecutive_shorthand_rules() {
        let sheet = parse_stylesheet(
            ".x _-- { color: red; }\n.x --brand-- { color: blue; margin: 0; }",
        )
        .unwrap();

        let report = transform(&sheet, &Options::default()).unwrap();

        assert_eq!(
            to_css(&sheet),
            ".x {\n  color: var(--x--color, red);\n  color: var(--brand---color, blue);\n  margin: var(--brand---margin, 0);\n}\n"
        );
        assert_eq!(
            report,
            TransformReport {
                rules_seen: 2,
                rules_rewritten: 2,
                rules_merged: 1,
                declarations_rewritten: 3,
            }
        );
        assert_eq!(css_tree::collect_rules(&sheet.root).len(), 1);
    }

    #[test]
    fn test_merge_only_looks_one_rule_back() {
        assert_eq!(
            rewrite_default(".x { color: red; }\n.y { color: green; }\n.x _-- { color: blue; }"),
            ".x {\n  color: red;\n}\n\n.y {\n  color: green;\n}\n\n.x {\n  color: var(--x--color, blue);\n}\n"
        );
    }

    #[test]
    fn test_no_merge_across_parents() {
        assert_eq!(
            rewrite_default(".x { color: red; }\n@media print { .x _-- { color: blue; } }"),
            ".x {\n  color: red;\n}\n\n@media print {\n  .x {\n    color: var(--print--x--color, blue);\n  }\n}\n"
        );
    }

    #[test]
    fn test_pseudo_class_is_kept() {
        assert_eq!(
            rewrite_default(".btn _--:hover { color: red; }"),
            ".btn:hover {\n  color: var(--btn--hover--color, red);\n}\n"
        );
    }

    #[test]
    fn test_descendant_selector_and_important() {
        assert_eq!(
            rewrite_default(".nav .item _-- { color: red !important; }"),
            ".nav .item {\n  color: var(--nav--item--color, red) !important;\n}\n"
        );
    }

    #[test]
    fn test_every_selector_shares_the_declarations() {
        assert_eq!(
            rewrite_default(".a _--, .b _-- { color: red; }"),
            ".a, .b {\n  color: var(--a--color, red);\n  color: var(--b--color, red);\n}\n"
        );
    }

    #[test]
    fn test_nearest_media_only() {
        assert_eq!(
            rewrite_default("@media screen { @media (hover: hover) { .a _-- { color: red; } } }"),
            "@media screen {\n  @media (hover: hover) {\n    .a {\n      color: var(--hover--hover--a--color, red);\n    }\n  }\n}\n"
        );
    }

    #[test]
    fn test_rule_order_is_preserved() {
        assert_eq!(
            rewrite_default(".first {}\n.mid _-- { color: red; }\n.last {}"),
            ".first {}\n\n.mid {\n  color: var(--mid--color, red);\n}\n\n.last {}\n"
        );
    }

    #[test]
    fn test_shorthand_rule_without_declarations() {
        assert_eq!(rewrite_default(".empty _-- {}"), ".empty {}\n");
    }
}
