/*!
 * Subtitle list model and the workflow around it.
 *
 * - `list`: ordered cues with insert/update and the completeness predicate
 * - `payload`: request bodies for saving subtitles and posting notes
 * - `workflow`: approval state machine gated on completeness
 */

pub mod list;
pub mod payload;
pub mod workflow;

pub use list::{Cue, CueId, SubtitleList};
pub use payload::{NoteRequest, SaveSubtitlesRequest};
pub use workflow::{ApprovalWorkflow, ReviewState, WorkflowAction};
