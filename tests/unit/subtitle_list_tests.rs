/*!
 * Tests for the subtitle list model and its completeness predicate
 */

use subedit::dfxp::{DfxpMetadata, parse_dfxp};
use subedit::markup::{Style, StyleFlags, StyledNode};
use subedit::subtitles::SubtitleList;

use crate::common::SAMPLE_DFXP;

#[test]
fn test_completeness_shouldFollowEditSequence() {
    let mut list = SubtitleList::new();
    assert!(list.is_complete());

    let id = list.insert_before(None);
    assert!(!list.is_complete());

    list.update_content(id, "hello");
    assert!(!list.is_complete());

    list.update_time(id, Some(1_000), None);
    assert!(!list.is_complete());

    list.update_time(id, Some(1_000), Some(2_000));
    assert!(list.is_complete());

    list.update_content(id, "");
    assert!(!list.is_complete());
}

#[test]
fn test_insertBefore_shouldKeepOrderAndStableIds() {
    let mut list = SubtitleList::new();
    let first = list.insert_before(None);
    let third = list.insert_before(None);
    let second = list.insert_before(Some(third));

    let order: Vec<_> = list.iter().map(|cue| cue.id()).collect();
    assert_eq!(order, vec![first, second, third]);
    assert_ne!(first, second);
    assert_ne!(second, third);
}

#[test]
fn test_insertBefore_shouldCreateEmptyUnsyncedCue() {
    let mut list = SubtitleList::new();
    let id = list.insert_before(None);
    let cue = list.get(id).unwrap();

    assert_eq!(cue.content(), "");
    assert_eq!(cue.start_time_ms(), None);
    assert_eq!(cue.end_time_ms(), None);
    assert!(!cue.is_synced());
}

#[test]
fn test_counts_shouldReflectCueStates() {
    let mut list = SubtitleList::new();
    let synced = list.insert_before(None);
    let text_only = list.insert_before(None);
    list.update_content(synced, "one");
    list.update_time(synced, Some(0), Some(500));
    list.update_content(text_only, "two");

    assert_eq!(list.len(), 2);
    assert_eq!(list.synced_count(), 1);
    assert_eq!(list.incomplete_count(), 1);
    assert_eq!(list.first_incomplete(), Some(text_only));
}

#[test]
fn test_updateTime_withZeroStart_shouldCountAsSet() {
    let mut list = SubtitleList::new();
    let id = list.insert_before(None);
    list.update_content(id, "starts at zero");
    list.update_time(id, Some(0), Some(0));
    assert!(list.is_complete());
}

#[test]
#[should_panic(expected = "not in this subtitle list")]
fn test_updateContent_withRemovedCue_shouldPanic() {
    let mut list = SubtitleList::new();
    let id = list.insert_before(None);
    list.remove(id);
    list.update_content(id, "gone");
}

#[test]
fn test_fromDfxp_shouldCarryMarkupAndTiming() {
    let document = parse_dfxp(SAMPLE_DFXP).unwrap();
    let list = SubtitleList::from_dfxp(&document);

    assert_eq!(list.len(), 4);
    let second = &list.cues()[1];
    assert_eq!(second.content(), "_underline **bold**_");
    assert_eq!(second.start_time_ms(), Some(4_500));
    assert_eq!(second.end_time_ms(), Some(7_250));

    assert!(!list.is_complete());
    assert_eq!(list.first_incomplete(), Some(list.cues()[3].id()));
}

#[test]
fn test_cueTree_shouldDecodeInlineMarkup() {
    let mut list = SubtitleList::new();
    let id = list.insert_before(None);
    list.update_content(id, "**bold**");

    let tree = list.cue_tree(id).unwrap();
    assert_eq!(
        tree,
        StyledNode::paragraph(vec![StyledNode::span(
            StyleFlags::only(Style::Bold),
            vec![StyledNode::text("bold")],
        )])
    );
}

#[test]
fn test_toDfxp_withMalformedCue_shouldFail() {
    let mut list = SubtitleList::new();
    let id = list.insert_before(None);
    list.update_content(id, "**bold*");

    assert!(list.to_dfxp(DfxpMetadata::default()).is_err());
}

#[test]
fn test_toDfxp_shouldKeepUnsetTimes() {
    let document = parse_dfxp(SAMPLE_DFXP).unwrap();
    let list = SubtitleList::from_dfxp(&document);
    let rebuilt = list.to_dfxp(document.metadata.clone()).unwrap();

    assert_eq!(rebuilt.paragraphs.len(), 4);
    assert_eq!(rebuilt.paragraphs[3].begin, None);
    assert_eq!(rebuilt.paragraphs[3].end, None);
    assert_eq!(rebuilt.metadata, document.metadata);
}
