/*!
 * Error types for the subedit library.
 *
 * This module contains custom error types for the different parts of the
 * crate, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::subtitles::workflow::ReviewState;

/// Errors raised while parsing inline markup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// Delimiters are unbalanced, overlapping or otherwise ambiguous
    #[error("Malformed markup at byte {offset}: {reason}")]
    MalformedMarkup {
        /// Byte offset in the input where resolution failed
        offset: usize,
        /// Short description of the problem
        reason: String,
    },
}

impl MarkupError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedMarkup {
            offset,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when reading DFXP documents
#[derive(Error, Debug)]
pub enum DfxpError {
    /// The XML itself could not be read
    #[error("XML error at position {position}: {message}")]
    Xml {
        /// Byte position reported by the reader
        position: usize,
        /// Reader error message
        message: String,
    },

    /// A begin/end/dur attribute is not a supported time expression
    #[error("Invalid time expression: {0}")]
    InvalidTime(String),
}

/// Errors returned by the review workflow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Approval attempted while some lines still miss text or timing
    #[error("You need to add text and timing to every subtitle before approving ({incomplete} incomplete)")]
    IncompleteSubtitles {
        /// Number of incomplete cues
        incomplete: usize,
    },

    /// The action is not available from the current state
    #[error("Cannot {action} subtitles that are already {from}")]
    InvalidTransition {
        /// State the workflow was in
        from: ReviewState,
        /// Action that was attempted
        action: &'static str,
    },

    /// A note was required but none was given
    #[error("A note explaining what needs to change is required")]
    EmptyNote,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from inline markup parsing
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    /// Error from DFXP reading
    #[error("DFXP error: {0}")]
    Dfxp(#[from] DfxpError),

    /// Error from the review workflow
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
