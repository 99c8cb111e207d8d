/*!
 * JSON payloads for the subtitle save and note endpoints.
 *
 * Only the request bodies are built here; sending them is up to the caller.
 */

use serde::{Deserialize, Serialize};

use super::list::SubtitleList;
use super::workflow::WorkflowAction;
use crate::dfxp::{parse_dfxp, write_dfxp, DfxpMetadata};
use crate::errors::{AppError, DfxpError, WorkflowError};

/// Format tag sent alongside the serialized subtitles
pub const SUBTITLE_FORMAT: &str = "dfxp";

/// Body of a save-subtitles request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSubtitlesRequest {
    pub video_id: String,
    pub language_code: String,
    /// Serialized DFXP document
    pub subtitles: String,
    pub sub_format: String,
    pub title: String,
    pub description: String,
    pub is_complete: bool,
    /// Workflow action to perform after saving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl SaveSubtitlesRequest {
    /// Build a save request; completeness is taken from the list as it is now
    pub fn from_list(
        video_id: &str,
        language_code: &str,
        title: &str,
        description: &str,
        subtitles: &SubtitleList,
        action: Option<WorkflowAction>,
    ) -> Result<Self, AppError> {
        let metadata = DfxpMetadata {
            language: Some(language_code.to_string()),
            title: Some(title.to_string()).filter(|t| !t.is_empty()),
            description: Some(description.to_string()).filter(|d| !d.is_empty()),
        };
        let document = subtitles.to_dfxp(metadata)?;

        Ok(Self {
            video_id: video_id.to_string(),
            language_code: language_code.to_string(),
            subtitles: write_dfxp(&document),
            sub_format: SUBTITLE_FORMAT.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            is_complete: subtitles.is_complete(),
            action: action.map(|action| action.name().to_string()),
        })
    }

    /// Restore the subtitle list carried by this request
    pub fn decode_list(&self) -> Result<SubtitleList, DfxpError> {
        let document = parse_dfxp(&self.subtitles)?;
        Ok(SubtitleList::from_dfxp(&document))
    }
}

/// Body of a free-text note request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRequest {
    pub body: String,
}

impl NoteRequest {
    pub fn new(body: &str) -> Result<Self, WorkflowError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(WorkflowError::EmptyNote);
        }
        Ok(Self {
            body: body.to_string(),
        })
    }
}
