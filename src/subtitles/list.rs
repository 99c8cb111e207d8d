use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dfxp::{DfxpDocument, DfxpMetadata, DfxpParagraph};
use crate::errors::MarkupError;
use crate::markup::{from_inline_markup, to_inline_markup, StyledNode};

// @module: Ordered, timed subtitle cues edited in place

// @struct: Stable handle to a cue inside one list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CueId(u64);

impl fmt::Display for CueId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    // @field: Handle within the owning list
    id: CueId,

    // @field: Start time in ms, None until synced
    start_time_ms: Option<u64>,

    // @field: End time in ms, None until synced
    end_time_ms: Option<u64>,

    // @field: Content as inline markup
    content: String,
}

impl Cue {
    fn empty(id: CueId) -> Self {
        Cue {
            id,
            start_time_ms: None,
            end_time_ms: None,
            content: String::new(),
        }
    }

    pub fn id(&self) -> CueId {
        self.id
    }

    pub fn start_time_ms(&self) -> Option<u64> {
        self.start_time_ms
    }

    pub fn end_time_ms(&self) -> Option<u64> {
        self.end_time_ms
    }

    /// Content as inline markup
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whitespace-only content counts as empty
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Both start and end time are set
    pub fn is_synced(&self) -> bool {
        self.start_time_ms.is_some() && self.end_time_ms.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.has_content() && self.is_synced()
    }

    /// Decode the content into a styled tree
    pub fn to_tree(&self) -> Result<StyledNode, MarkupError> {
        from_inline_markup(&self.content)
    }
}

/// Ordered collection of cues
///
/// Mutation goes through `CueId` handles returned by `insert_before`.
/// Passing a handle that is not in the list is a programming error and
/// panics rather than silently reordering or dropping cues.
#[derive(Debug, Clone, Default)]
pub struct SubtitleList {
    cues: Vec<Cue>,
    next_id: u64,
}

impl SubtitleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cue> {
        self.cues.iter()
    }

    pub fn get(&self, id: CueId) -> Option<&Cue> {
        self.cues.iter().find(|cue| cue.id == id)
    }

    pub fn index_of(&self, id: CueId) -> Option<usize> {
        self.cues.iter().position(|cue| cue.id == id)
    }

    fn position(&self, id: CueId, operation: &str) -> usize {
        match self.index_of(id) {
            Some(index) => index,
            None => panic!("{}: cue {} is not in this subtitle list", operation, id),
        }
    }

    fn allocate_id(&mut self) -> CueId {
        let id = CueId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert an empty, unsynced cue before `reference`, or at the end for `None`
    ///
    /// # Panics
    /// When `reference` is not in the list.
    pub fn insert_before(&mut self, reference: Option<CueId>) -> CueId {
        let index = match reference {
            Some(reference) => self.position(reference, "insert_before"),
            None => self.cues.len(),
        };
        let id = self.allocate_id();
        self.cues.insert(index, Cue::empty(id));
        debug!("Inserted cue {} at position {}", id, index);
        id
    }

    /// Replace a cue's content
    ///
    /// # Panics
    /// When `id` is not in the list.
    pub fn update_content(&mut self, id: CueId, content: impl Into<String>) {
        let index = self.position(id, "update_content");
        self.cues[index].content = content.into();
    }

    /// Set start and end time together
    ///
    /// # Panics
    /// When `id` is not in the list.
    pub fn update_time(&mut self, id: CueId, start_time_ms: Option<u64>, end_time_ms: Option<u64>) {
        let index = self.position(id, "update_time");
        let cue = &mut self.cues[index];
        cue.start_time_ms = start_time_ms;
        cue.end_time_ms = end_time_ms;
    }

    /// Remove a cue explicitly
    ///
    /// # Panics
    /// When `id` is not in the list.
    pub fn remove(&mut self, id: CueId) -> Cue {
        let index = self.position(id, "remove");
        self.cues.remove(index)
    }

    /// Every cue has content and both times; evaluated on each call
    pub fn is_complete(&self) -> bool {
        self.cues.iter().all(Cue::is_complete)
    }

    pub fn synced_count(&self) -> usize {
        self.cues.iter().filter(|cue| cue.is_synced()).count()
    }

    pub fn incomplete_count(&self) -> usize {
        self.cues.iter().filter(|cue| !cue.is_complete()).count()
    }

    /// First cue missing content or timing
    pub fn first_incomplete(&self) -> Option<CueId> {
        self.cues.iter().find(|cue| !cue.is_complete()).map(Cue::id)
    }

    /// Decode a cue's content into a styled tree
    ///
    /// # Panics
    /// When `id` is not in the list.
    pub fn cue_tree(&self, id: CueId) -> Result<StyledNode, MarkupError> {
        let index = self.position(id, "cue_tree");
        self.cues[index].to_tree()
    }

    /// Build a list from DFXP paragraphs, content rendered as inline markup
    pub fn from_dfxp(document: &DfxpDocument) -> Self {
        let mut list = Self::new();
        for paragraph in &document.paragraphs {
            let id = list.insert_before(None);
            list.update_content(id, to_inline_markup(&paragraph.content));
            list.update_time(id, paragraph.begin, paragraph.end);
        }
        list
    }

    /// Build a DFXP document from the cues; fails on cues with malformed markup
    pub fn to_dfxp(&self, metadata: DfxpMetadata) -> Result<DfxpDocument, MarkupError> {
        let paragraphs = self
            .cues
            .iter()
            .map(|cue| {
                Ok(DfxpParagraph {
                    begin: cue.start_time_ms,
                    end: cue.end_time_ms,
                    content: cue.to_tree()?,
                })
            })
            .collect::<Result<Vec<_>, MarkupError>>()?;

        Ok(DfxpDocument {
            metadata,
            paragraphs,
        })
    }
}
