/*!
 * Tests for rendering styled DFXP paragraphs as inline markup
 */

use subedit::dfxp::parse_paragraph;
use subedit::markup::{Style, StyleFlags, StyledNode, render_nodes, to_inline_markup};

fn markup_of(xml: &str) -> String {
    let paragraph = parse_paragraph(xml).expect("fixture should parse");
    to_inline_markup(&paragraph)
}

#[test]
fn test_render_withPlainParagraph_shouldReturnText() {
    assert_eq!(markup_of("<p>simple text</p>"), "simple text");
}

#[test]
fn test_render_withBoldSpan_shouldWrapInDoubleStars() {
    assert_eq!(markup_of(r#"<p><span fontWeight="bold">text</span></p>"#), "**text**");
}

#[test]
fn test_render_withItalicSpan_shouldWrapInSingleStar() {
    assert_eq!(markup_of(r#"<p><span fontStyle="italic">text</span></p>"#), "*text*");
}

#[test]
fn test_render_withUnderlineSpan_shouldWrapInUnderscores() {
    assert_eq!(markup_of(r#"<p><span textDecoration="underline">text</span></p>"#), "_text_");
}

#[test]
fn test_render_withLineBreak_shouldEmitNewline() {
    assert_eq!(markup_of("<p>line1<br/>line2</p>"), "line1\nline2");
}

#[test]
fn test_render_withAttributeSpellings_shouldAllUnderline() {
    let expected = markup_of(r#"<p><span textDecoration="underline">text</span></p>"#);
    assert_eq!(markup_of(r#"<p><span textdecoration="underline">text</span></p>"#), expected);
    assert_eq!(markup_of(r#"<p><span tts:textDecoration="underline">text</span></p>"#), expected);
}

#[test]
fn test_render_withNestedSpans_shouldKeepOuterDelimitersOutside() {
    let xml = r#"<p><span tts:textDecoration="underline">underline <span tts:fontWeight="bold">bold</span></span></p>"#;
    assert_eq!(markup_of(xml), "_underline **bold**_");
}

#[test]
fn test_render_withBreakInsideSpan_shouldKeepNewlineInsideDelimiters() {
    let xml = r#"<p><span tts:textDecoration="underline">line1<br/>line2</span></p>"#;
    assert_eq!(markup_of(xml), "_line1\nline2_");
}

#[test]
fn test_render_withEmptyParagraph_shouldReturnEmptyString() {
    assert_eq!(markup_of("<p></p>"), "");
    assert_eq!(to_inline_markup(&StyledNode::paragraph(vec![])), "");
}

#[test]
fn test_render_withUnknownAttributes_shouldIgnoreThem() {
    let xml = r#"<p><span tts:color="red" begin="1s">text</span></p>"#;
    assert_eq!(markup_of(xml), "text");
}

#[test]
fn test_render_withSameStyleNestedInDfxp_shouldWrapOnce() {
    let xml = r#"<p><span tts:fontWeight="bold">a <span tts:fontWeight="bold">b</span> c</span></p>"#;
    assert_eq!(markup_of(xml), "**a b c**");
}

#[test]
fn test_render_withBoldAndItalicOnOneSpan_shouldPutBoldOutside() {
    let xml = r#"<p><span tts:fontStyle="italic" tts:fontWeight="bold">text</span></p>"#;
    assert_eq!(markup_of(xml), "***text***");
}

#[test]
fn test_render_withLiteralDelimiters_shouldEscapeThem() {
    assert_eq!(markup_of("<p>2 * 3 = snake_case</p>"), r"2 \* 3 = snake\_case");
}

#[test]
fn test_renderNodes_withForest_shouldConcatenateWithoutSeparator() {
    let nodes = vec![
        StyledNode::paragraph(vec![StyledNode::text("one")]),
        StyledNode::paragraph(vec![StyledNode::span(
            StyleFlags::only(Style::Italic),
            vec![StyledNode::text("two")],
        )]),
    ];
    assert_eq!(render_nodes(&nodes), "one*two*");
}
