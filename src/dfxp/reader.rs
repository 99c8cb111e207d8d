/*!
 * DFXP reader.
 *
 * Walks the XML event stream once. Outside of `<p>` elements only the
 * document language, title and description are collected; inside a `<p>`
 * a stack of open elements builds the styled tree for that cue.
 */

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::timing::parse_time_expression;
use super::{DfxpDocument, DfxpParagraph, ReadOptions};
use crate::errors::DfxpError;
use crate::language_utils;
use crate::markup::attributes::normalize_attribute_name;
use crate::markup::{StyleFlags, StyledNode};

/// Parse a full DFXP document with default options
pub fn parse_dfxp(xml: &str) -> Result<DfxpDocument, DfxpError> {
    parse_dfxp_with(xml, &ReadOptions::default())
}

/// Parse the first `<p>` of an XML fragment into a paragraph node
///
/// Fragments do not need namespace declarations, so `<p>text <span
/// tts:fontWeight="bold">x</span></p>` is accepted as is. Input without
/// any `<p>` yields an empty paragraph.
pub fn parse_paragraph(xml: &str) -> Result<StyledNode, DfxpError> {
    let document = parse_dfxp(xml)?;
    Ok(document
        .paragraphs
        .into_iter()
        .next()
        .map(|paragraph| paragraph.content)
        .unwrap_or_else(|| StyledNode::paragraph(Vec::new())))
}

#[derive(Debug, Clone, Copy)]
enum MetadataField {
    Title,
    Description,
}

/// Parse a full DFXP document
pub fn parse_dfxp_with(xml: &str, options: &ReadOptions) -> Result<DfxpDocument, DfxpError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut document = DfxpDocument::default();
    let mut paragraph: Option<ParagraphBuilder> = None;
    let mut capture: Option<MetadataField> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                let attributes = attributes_of(&e, &reader)?;
                match paragraph.as_mut() {
                    Some(builder) => builder.start_element(&name, &attributes),
                    None => match name.as_str() {
                        "p" => paragraph = Some(ParagraphBuilder::open(&attributes)?),
                        "tt" => document.metadata.language = document_language(&attributes),
                        "title" => capture = Some(MetadataField::Title),
                        "desc" => capture = Some(MetadataField::Description),
                        _ => {}
                    },
                }
            }
            Ok(Event::Empty(e)) => {
                let name = local_name(&e);
                match paragraph.as_mut() {
                    Some(builder) => builder.empty_element(&name),
                    None if name == "p" => {
                        let attributes = attributes_of(&e, &reader)?;
                        let builder = ParagraphBuilder::open(&attributes)?;
                        document.paragraphs.push(builder.finish(options));
                    }
                    None => {}
                }
            }
            Ok(Event::End(_)) => {
                if let Some(builder) = paragraph.as_mut() {
                    if builder.end_element() {
                        if let Some(builder) = paragraph.take() {
                            document.paragraphs.push(builder.finish(options));
                        }
                    }
                } else {
                    capture = None;
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| xml_error(&reader, err))?;
                push_text(&mut document, paragraph.as_mut(), capture, &text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(&mut document, paragraph.as_mut(), capture, &text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(&reader, e)),
            _ => {}
        }
        buf.clear();
    }

    if paragraph.is_some() {
        return Err(DfxpError::Xml {
            position: reader.buffer_position(),
            message: "unexpected end of document inside <p>".to_string(),
        });
    }

    debug!("Read {} DFXP paragraphs", document.paragraphs.len());
    Ok(document)
}

fn push_text(
    document: &mut DfxpDocument,
    paragraph: Option<&mut ParagraphBuilder>,
    capture: Option<MetadataField>,
    text: &str,
) {
    if let Some(builder) = paragraph {
        builder.text(text);
        return;
    }
    let slot = match capture {
        Some(MetadataField::Title) => &mut document.metadata.title,
        Some(MetadataField::Description) => &mut document.metadata.description,
        None => return,
    };
    slot.get_or_insert_with(String::new).push_str(text.trim());
}

fn local_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

fn attributes_of(element: &BytesStart, reader: &Reader<&[u8]>) -> Result<Vec<(String, String)>, DfxpError> {
    let mut attributes = Vec::new();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|err| xml_error(reader, err))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| xml_error(reader, err))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

fn xml_error(reader: &Reader<&[u8]>, error: impl std::fmt::Display) -> DfxpError {
    DfxpError::Xml {
        position: reader.buffer_position(),
        message: error.to_string(),
    }
}

/// Value of an attribute, matched like style attributes (case and prefix insensitive)
fn attribute<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| normalize_attribute_name(key) == name)
        .map(|(_, value)| value.as_str())
}

fn document_language(attributes: &[(String, String)]) -> Option<String> {
    let language = attribute(attributes, "lang")?.trim();
    if language.is_empty() {
        return None;
    }
    if let Err(e) = language_utils::validate_language_code(language) {
        warn!("Document language issue: {}", e);
    }
    Some(language.to_string())
}

fn style_flags(attributes: &[(String, String)]) -> StyleFlags {
    StyleFlags::from_attributes(
        attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    )
}

/// Whitespace as XML defines it; no-break spaces are content
fn is_xml_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Collapse XML whitespace runs to one space, continuing a run already open in `in_space`
fn collapse_whitespace(text: &str, in_space: &mut bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if is_xml_whitespace(ch) {
            if !*in_space {
                out.push(' ');
            }
            *in_space = true;
        } else {
            out.push(ch);
            *in_space = false;
        }
    }
    out
}

#[derive(Debug)]
enum FrameKind {
    Span(StyleFlags),
    Break,
    Transparent,
}

/// Builds the styled tree of one `<p>` element
#[derive(Debug)]
struct ParagraphBuilder {
    begin: Option<u64>,
    end: Option<u64>,
    style: StyleFlags,
    children: Vec<StyledNode>,
    frames: Vec<(FrameKind, Vec<StyledNode>)>,
    // Last character emitted in this paragraph was collapsed whitespace or a break
    after_space: bool,
}

impl ParagraphBuilder {
    fn open(attributes: &[(String, String)]) -> Result<Self, DfxpError> {
        let begin = attribute(attributes, "begin")
            .map(parse_time_expression)
            .transpose()?
            .flatten();
        let mut end = attribute(attributes, "end")
            .map(parse_time_expression)
            .transpose()?
            .flatten();

        if end.is_none() {
            let duration = attribute(attributes, "dur")
                .map(parse_time_expression)
                .transpose()?
                .flatten();
            if let (Some(begin), Some(duration)) = (begin, duration) {
                let sum = begin
                    .checked_add(duration)
                    .ok_or_else(|| DfxpError::InvalidTime(format!("{}ms + {}ms", begin, duration)))?;
                end = Some(sum);
            }
        }

        Ok(Self {
            begin,
            end,
            style: style_flags(attributes),
            children: Vec::new(),
            frames: Vec::new(),
            after_space: false,
        })
    }

    fn current(&mut self) -> &mut Vec<StyledNode> {
        match self.frames.last_mut() {
            Some((_, children)) => children,
            None => &mut self.children,
        }
    }

    fn start_element(&mut self, name: &str, attributes: &[(String, String)]) {
        let kind = match name {
            "span" => FrameKind::Span(style_flags(attributes)),
            "br" => FrameKind::Break,
            _ => FrameKind::Transparent,
        };
        self.frames.push((kind, Vec::new()));
    }

    fn empty_element(&mut self, name: &str) {
        if name == "br" {
            self.push_break();
        }
    }

    fn push_break(&mut self) {
        let current = self.current();
        if let Some(StyledNode::Text { text }) = current.last_mut() {
            let trimmed_len = text.trim_end_matches(is_xml_whitespace).len();
            text.truncate(trimmed_len);
        }
        current.push(StyledNode::line_break());
        self.after_space = true;
    }

    fn text(&mut self, text: &str) {
        let collapsed = collapse_whitespace(text, &mut self.after_space);
        if !collapsed.is_empty() {
            self.current().push(StyledNode::text(collapsed));
        }
    }

    /// Close the innermost element; true when that was the paragraph itself
    fn end_element(&mut self) -> bool {
        let Some((kind, children)) = self.frames.pop() else {
            return true;
        };
        match kind {
            FrameKind::Span(style) => self.current().push(StyledNode::span(style, children)),
            FrameKind::Break => self.push_break(),
            FrameKind::Transparent => self.current().extend(children),
        }
        false
    }

    fn finish(self, options: &ReadOptions) -> DfxpParagraph {
        let mut children = self.children;
        if options.trim_whitespace {
            trim_leading(&mut children);
            trim_trailing(&mut children);
        }
        if !self.style.is_empty() {
            children = vec![StyledNode::span(self.style, children)];
        }
        DfxpParagraph {
            begin: self.begin,
            end: self.end,
            content: StyledNode::paragraph(children),
        }
    }
}

/// Trim whitespace from the first text leaf; true once a non-blank leaf is reached
fn trim_leading(nodes: &mut Vec<StyledNode>) -> bool {
    let mut index = 0;
    while index < nodes.len() {
        match &mut nodes[index] {
            StyledNode::Text { text } => {
                let trimmed = text.trim_start_matches(is_xml_whitespace).to_string();
                if trimmed.is_empty() {
                    nodes.remove(index);
                    continue;
                }
                *text = trimmed;
                return true;
            }
            StyledNode::LineBreak => return true,
            StyledNode::Span { children, .. } | StyledNode::Paragraph { children } => {
                if trim_leading(children) {
                    return true;
                }
                index += 1;
            }
        }
    }
    false
}

fn trim_trailing(nodes: &mut Vec<StyledNode>) -> bool {
    let mut index = nodes.len();
    while index > 0 {
        index -= 1;
        match &mut nodes[index] {
            StyledNode::Text { text } => {
                let trimmed = text.trim_end_matches(is_xml_whitespace).to_string();
                if trimmed.is_empty() {
                    nodes.remove(index);
                    continue;
                }
                *text = trimmed;
                return true;
            }
            StyledNode::LineBreak => return true,
            StyledNode::Span { children, .. } | StyledNode::Paragraph { children } => {
                if trim_trailing(children) {
                    return true;
                }
            }
        }
    }
    false
}
