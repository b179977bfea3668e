#![allow(clippy::unwrap_used, clippy::expect_used)]

use rstest::rstest;

use crate::base::Position;
use crate::syntax::{extract_mixins, extract_variables};

#[test]
fn test_parameterless_mixin() {
    let src = ".box() {\n width: 100px;\n}";
    let mixins = extract_mixins(src);
    assert_eq!(mixins.len(), 1);
    assert_eq!(mixins[0].name, ".box");
    assert_eq!(mixins[0].params, "");
    assert_eq!(mixins[0].body, src);
    assert_eq!(mixins[0].position, Position::new(0, 0));
}

#[test]
fn test_variable_and_mixin_in_one_document() {
    let src = "@color: red; // inline\n.box() {\n width: 100px;\n}";
    let vars = extract_variables(src);
    assert_eq!(vars.len(), 1);
    assert_eq!(vars[0].name, "@color");
    assert_eq!(vars[0].value, "red");

    let mixins = extract_mixins(src);
    assert_eq!(mixins.len(), 1);
    assert_eq!(mixins[0].name, ".box");
    assert_eq!(mixins[0].params, "");
    assert_eq!(mixins[0].body, ".box() {\n width: 100px;\n}");
}

#[test]
fn test_mixin_without_parens() {
    let mixins = extract_mixins(".card {\n color: red;\n}");
    assert_eq!(mixins.len(), 1);
    assert_eq!(mixins[0].name, ".card");
    assert_eq!(mixins[0].params, "");
}

#[test]
fn test_mixin_with_params() {
    let mixins = extract_mixins(".bordered(@width: 1px, @style: solid) { border: @width @style; }");
    assert_eq!(mixins.len(), 1);
    assert_eq!(mixins[0].params, "@width: 1px, @style: solid");
}

#[test]
fn test_nested_parens_in_params() {
    let mixins = extract_mixins(".m(@x: calc((100% - 10px) / 2)) { width: @x; }");
    assert_eq!(mixins.len(), 1);
    assert_eq!(mixins[0].params, "@x: calc((100% - 10px) / 2)");
}

#[test]
fn test_paren_chars_inside_quoted_param() {
    let mixins = extract_mixins(".m(@s: ') not the end') { content: @s; }");
    assert_eq!(mixins.len(), 1);
    assert_eq!(mixins[0].params, "@s: ') not the end'");
}

#[test]
fn test_nested_mixins_reported_independently() {
    let src = ".outer() {\n .inner() {\n  color: red;\n }\n}";
    let mixins = extract_mixins(src);
    assert_eq!(mixins.len(), 2);
    assert_eq!(mixins[0].name, ".outer");
    assert_eq!(mixins[0].body, src);
    assert_eq!(mixins[1].name, ".inner");
    assert_eq!(mixins[1].position.line, 1);
}

#[test]
fn test_truncated_body_runs_to_end_of_text() {
    let src = ".broken() {\n width: 1px;\n .also {";
    let mixins = extract_mixins(src);
    assert_eq!(mixins.len(), 2);
    assert_eq!(mixins[0].body, src);
    assert_eq!(mixins[1].name, ".also");
    assert_eq!(mixins[1].body, ".also {");
}

#[test]
fn test_brace_matching_skips_strings() {
    let src = ".m() { content: '}'; color: red; }";
    let mixins = extract_mixins(src);
    assert_eq!(mixins.len(), 1);
    assert_eq!(mixins[0].body, src);
}

#[rstest]
#[case("a.b { }")] // mid-identifier dot
#[case("width: 0.5px;")] // decimal number
#[case("@w: 12.5;")] // decimal in value
fn test_non_boundary_dots_ignored(#[case] src: &str) {
    assert!(extract_mixins(src).is_empty(), "matched in {src:?}");
}

#[rstest]
#[case(";.m { }")]
#[case("}.m { }")]
#[case(",.m { }")]
#[case(">.m { }")]
#[case("+.m { }")]
#[case("~.m { }")]
fn test_boundary_chars_allow_match(#[case] src: &str) {
    let mixins = extract_mixins(src);
    assert_eq!(mixins.len(), 1, "no match in {src:?}");
    assert_eq!(mixins[0].name, ".m");
}

#[test]
fn test_pseudo_class_not_a_mixin() {
    // `.box:hover {` — the colon breaks the signature before the brace.
    assert!(extract_mixins(".box:hover { color: red; }").is_empty());
}

#[test]
fn test_mixin_inside_comment_ignored() {
    assert!(extract_mixins("/* .ghost() { } */").is_empty());
}

#[test]
fn test_mixin_position_column() {
    let mixins = extract_mixins("  .pad() { padding: 0; }");
    assert_eq!(mixins[0].position, Position::new(0, 2));
}

#[test]
fn test_newline_between_signature_and_brace() {
    let mixins = extract_mixins(".m(@a)\n{\n color: @a;\n}");
    assert_eq!(mixins.len(), 1);
    assert_eq!(mixins[0].params, "@a");
}
