/*!
 * Styled text tree used for cue content.
 */

use serde::{Deserialize, Serialize};

/// One of the three inline styles a span can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Underline,
    Bold,
    Italic,
}

impl Style {
    /// Outer-to-inner order used when one span carries several styles
    pub const PRIORITY: [Style; 3] = [Style::Underline, Style::Bold, Style::Italic];

    /// Inline markup delimiter for this style
    pub fn delimiter(self) -> &'static str {
        match self {
            Style::Underline => "_",
            Style::Bold => "**",
            Style::Italic => "*",
        }
    }

    /// DFXP styling attribute and value that express this style
    pub fn dfxp_attribute(self) -> (&'static str, &'static str) {
        match self {
            Style::Underline => ("tts:textDecoration", "underline"),
            Style::Bold => ("tts:fontWeight", "bold"),
            Style::Italic => ("tts:fontStyle", "italic"),
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Style::Underline => write!(f, "underline"),
            Style::Bold => write!(f, "bold"),
            Style::Italic => write!(f, "italic"),
        }
    }
}

/// Boolean style flags carried by a span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleFlags {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl StyleFlags {
    /// Flags with a single style set
    pub fn only(style: Style) -> Self {
        let mut flags = Self::default();
        flags.insert(style);
        flags
    }

    pub fn contains(&self, style: Style) -> bool {
        match style {
            Style::Underline => self.underline,
            Style::Bold => self.bold,
            Style::Italic => self.italic,
        }
    }

    pub fn insert(&mut self, style: Style) {
        match style {
            Style::Underline => self.underline = true,
            Style::Bold => self.bold = true,
            Style::Italic => self.italic = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.bold || self.italic || self.underline)
    }

    /// Active styles in priority order (underline, bold, italic)
    pub fn iter(&self) -> impl Iterator<Item = Style> + '_ {
        Style::PRIORITY.into_iter().filter(move |style| self.contains(*style))
    }
}

/// A node of the styled text tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyledNode {
    /// Content block of one cue
    Paragraph { children: Vec<StyledNode> },
    /// Inline styling wrapper
    Span {
        style: StyleFlags,
        children: Vec<StyledNode>,
    },
    /// Forced line split
    LineBreak,
    /// Literal text
    Text { text: String },
}

impl StyledNode {
    pub fn paragraph(children: Vec<StyledNode>) -> Self {
        StyledNode::Paragraph { children }
    }

    pub fn span(style: StyleFlags, children: Vec<StyledNode>) -> Self {
        StyledNode::Span { style, children }
    }

    pub fn text(text: impl Into<String>) -> Self {
        StyledNode::Text { text: text.into() }
    }

    pub fn line_break() -> Self {
        StyledNode::LineBreak
    }

    /// Children of a paragraph or span; empty for leaves
    pub fn children(&self) -> &[StyledNode] {
        match self {
            StyledNode::Paragraph { children } | StyledNode::Span { children, .. } => children,
            StyledNode::LineBreak | StyledNode::Text { .. } => &[],
        }
    }

    /// Text content without any styling, line breaks as `\n`
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_plain_text(&mut out);
        out
    }

    fn collect_plain_text(&self, out: &mut String) {
        match self {
            StyledNode::Text { text } => out.push_str(text),
            StyledNode::LineBreak => out.push('\n'),
            StyledNode::Paragraph { children } | StyledNode::Span { children, .. } => {
                for child in children {
                    child.collect_plain_text(out);
                }
            }
        }
    }
}
