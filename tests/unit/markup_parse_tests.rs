/*!
 * Tests for parsing inline markup back into styled trees
 */

use subedit::dfxp::parse_paragraph;
use subedit::errors::MarkupError;
use subedit::markup::{Style, StyleFlags, StyledNode, from_inline_markup, to_inline_markup};

fn styled(style: Style, children: Vec<StyledNode>) -> StyledNode {
    StyledNode::span(StyleFlags::only(style), children)
}

#[test]
fn test_parse_withPlainText_shouldReturnSingleTextNode() {
    let tree = from_inline_markup("simple text").unwrap();
    assert_eq!(tree, StyledNode::paragraph(vec![StyledNode::text("simple text")]));
}

#[test]
fn test_parse_withEmptyInput_shouldReturnEmptyParagraph() {
    assert_eq!(from_inline_markup("").unwrap(), StyledNode::paragraph(vec![]));
}

#[test]
fn test_parse_withNewline_shouldProduceLineBreak() {
    let tree = from_inline_markup("line1\nline2").unwrap();
    assert_eq!(
        tree,
        StyledNode::paragraph(vec![
            StyledNode::text("line1"),
            StyledNode::line_break(),
            StyledNode::text("line2"),
        ])
    );
}

#[test]
fn test_parse_withBreakInsideUnderline_shouldKeepBreakInSpan() {
    let tree = from_inline_markup("_line1\nline2_").unwrap();
    assert_eq!(
        tree,
        StyledNode::paragraph(vec![styled(
            Style::Underline,
            vec![
                StyledNode::text("line1"),
                StyledNode::line_break(),
                StyledNode::text("line2"),
            ],
        )])
    );
}

#[test]
fn test_parse_withBoldThenItalicCluster_shouldCloseAndOpen() {
    let tree = from_inline_markup("**a***b*").unwrap();
    assert_eq!(
        tree,
        StyledNode::paragraph(vec![
            styled(Style::Bold, vec![StyledNode::text("a")]),
            styled(Style::Italic, vec![StyledNode::text("b")]),
        ])
    );
}

#[test]
fn test_roundTrip_withCanonicalMarkup_shouldReproduceString() {
    let samples = [
        "simple text",
        "**text**",
        "*text*",
        "_text_",
        "line1\nline2",
        "_underline **bold**_",
        "_line1\nline2_",
        "***x***",
        "*a **b** c*",
        "**a***b*",
        "plain **bold** and *italic* and _underline_",
        r"2 \* 3 = snake\_case \\ done",
    ];

    for markup in samples {
        let tree = from_inline_markup(markup)
            .unwrap_or_else(|e| panic!("{:?} should parse: {}", markup, e));
        assert_eq!(to_inline_markup(&tree), markup, "round trip of {:?}", markup);
    }
}

#[test]
fn test_roundTrip_withDfxpParagraph_shouldKeepRenderedMarkup() {
    let fixtures = [
        "<p>simple text</p>",
        r#"<p><span tts:textDecoration="underline">underline <span tts:fontWeight="bold">bold</span></span></p>"#,
        r#"<p><span tts:fontStyle="italic" tts:fontWeight="bold">both</span> plain</p>"#,
        "<p>line1<br/>line2</p>",
    ];

    for xml in fixtures {
        let rendered = to_inline_markup(&parse_paragraph(xml).unwrap());
        let reparsed = from_inline_markup(&rendered).unwrap();
        assert_eq!(to_inline_markup(&reparsed), rendered, "fixture {}", xml);
    }
}

#[test]
fn test_parse_withUnclosedBold_shouldReturnMalformedMarkup() {
    let error = from_inline_markup("**bold*").unwrap_err();
    assert!(matches!(error, MarkupError::MalformedMarkup { .. }));
}

#[test]
fn test_parse_withUnclosedUnderline_shouldFail() {
    assert!(from_inline_markup("_never closed").is_err());
}

#[test]
fn test_parse_withEmptyRun_shouldFail() {
    assert!(from_inline_markup("a ** b").is_err());
}

#[test]
fn test_parse_withClosedAndReopenedStyle_shouldFail() {
    assert!(from_inline_markup("_a__b_").is_err());
}

#[test]
fn test_parse_withDanglingEscape_shouldReportOffset() {
    let error = from_inline_markup("ok\\").unwrap_err();
    let MarkupError::MalformedMarkup { offset, .. } = error;
    assert_eq!(offset, 2);
}

#[test]
fn test_parse_withErrorMessage_shouldIncludeOffset() {
    let error = from_inline_markup("**bold*").unwrap_err();
    assert!(error.to_string().starts_with("Malformed markup at byte 7"));
}
