use quick_xml::escape::escape;

use super::timing::format_time_expression;
use super::{DfxpDocument, DfxpParagraph};
use crate::markup::StyledNode;

const TTML_NAMESPACE: &str = "http://www.w3.org/ns/ttml";
const TTML_STYLING_NAMESPACE: &str = "http://www.w3.org/ns/ttml#styling";
const TTML_METADATA_NAMESPACE: &str = "http://www.w3.org/ns/ttml#metadata";

/// Inner XML of a paragraph: styled spans, `<br/>` and escaped text
pub fn node_to_dfxp(node: &StyledNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &StyledNode) {
    match node {
        StyledNode::Text { text } => out.push_str(&escape(text.as_str())),
        StyledNode::LineBreak => out.push_str("<br/>"),
        StyledNode::Paragraph { children } => {
            for child in children {
                write_node(out, child);
            }
        }
        StyledNode::Span { style, children } => {
            if style.is_empty() {
                for child in children {
                    write_node(out, child);
                }
                return;
            }
            out.push_str("<span");
            for flag in style.iter() {
                let (name, value) = flag.dfxp_attribute();
                out.push_str(&format!(" {}=\"{}\"", name, value));
            }
            out.push('>');
            for child in children {
                write_node(out, child);
            }
            out.push_str("</span>");
        }
    }
}

fn write_paragraph(out: &mut String, paragraph: &DfxpParagraph) {
    out.push_str("      <p");
    if let Some(begin) = paragraph.begin {
        out.push_str(&format!(" begin=\"{}\"", format_time_expression(begin)));
    }
    if let Some(end) = paragraph.end {
        out.push_str(&format!(" end=\"{}\"", format_time_expression(end)));
    }
    out.push('>');
    out.push_str(&node_to_dfxp(&paragraph.content));
    out.push_str("</p>\n");
}

/// Serialize a full TTML document; unset times are left out
pub fn write_dfxp(document: &DfxpDocument) -> String {
    let metadata = &document.metadata;
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

    out.push_str(&format!(
        "<tt xmlns=\"{}\" xmlns:tts=\"{}\" xmlns:ttm=\"{}\"",
        TTML_NAMESPACE, TTML_STYLING_NAMESPACE, TTML_METADATA_NAMESPACE
    ));
    if let Some(language) = &metadata.language {
        out.push_str(&format!(" xml:lang=\"{}\"", escape(language.as_str())));
    }
    out.push_str(">\n");

    out.push_str("  <head>\n    <metadata>\n");
    if let Some(title) = &metadata.title {
        out.push_str(&format!("      <ttm:title>{}</ttm:title>\n", escape(title.as_str())));
    }
    if let Some(description) = &metadata.description {
        out.push_str(&format!("      <ttm:desc>{}</ttm:desc>\n", escape(description.as_str())));
    }
    out.push_str("    </metadata>\n  </head>\n");

    out.push_str("  <body>\n    <div>\n");
    for paragraph in &document.paragraphs {
        write_paragraph(&mut out, paragraph);
    }
    out.push_str("    </div>\n  </body>\n</tt>\n");

    out
}
