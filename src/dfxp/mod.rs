/*!
 * DFXP (TTML) subtitle documents.
 *
 * - `reader`: XML to paragraphs of styled nodes
 * - `writer`: styled nodes back to XML
 * - `timing`: begin/end/dur time expressions
 */

use serde::{Deserialize, Serialize};

use crate::markup::StyledNode;

pub mod reader;
pub mod timing;
pub mod writer;

pub use reader::{parse_dfxp, parse_dfxp_with, parse_paragraph};
pub use writer::{node_to_dfxp, write_dfxp};

/// Document-level metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfxpMetadata {
    /// `xml:lang` of the root element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// `ttm:title`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// `ttm:desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One `<p>` element: a cue's timing and content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfxpParagraph {
    /// Start in milliseconds, `None` when unsynced
    pub begin: Option<u64>,
    /// End in milliseconds, `None` when unsynced
    pub end: Option<u64>,
    /// Paragraph node holding the styled content
    pub content: StyledNode,
}

/// A parsed DFXP document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfxpDocument {
    pub metadata: DfxpMetadata,
    pub paragraphs: Vec<DfxpParagraph>,
}

/// Options for the DFXP reader
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Trim leading and trailing whitespace of each paragraph
    pub trim_whitespace: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
        }
    }
}
