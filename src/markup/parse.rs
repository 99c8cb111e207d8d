/*!
 * Inline markup back to a styled tree.
 *
 * Input is split into content segments and delimiter clusters. Each cluster
 * is resolved against the stack of open styles: closes first, innermost
 * style only, then opens for styles that are not already open. A run of
 * `*` can be split into bold and italic tokens several ways; the resolver
 * tries bold first and backtracks across clusters when a split leads to an
 * invalid structure. Dead (cluster, stack) states are remembered so the
 * search stays polynomial.
 */

use std::collections::HashSet;

use log::debug;

use super::node::{Style, StyleFlags, StyledNode};
use crate::errors::MarkupError;

/// Longest `*` run a cluster can need (close bold and italic, open both again)
const MAX_STAR_RUN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DelimiterRun {
    Underscore,
    Stars(usize),
}

#[derive(Debug)]
enum Segment {
    Content(Vec<Piece>),
    Delimiters { offset: usize, runs: Vec<DelimiterRun> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Open(Style),
    Close(Style),
}

/// Parse inline markup into a paragraph whose spans carry one style each
pub fn from_inline_markup(input: &str) -> Result<StyledNode, MarkupError> {
    let segments = tokenize(input)?;

    let mut resolver = Resolver {
        segments: &segments,
        input_len: input.len(),
        dead: HashSet::new(),
        failure: None,
    };
    let mut stack = Vec::new();
    let mut plan = Vec::new();

    if !resolver.resolve(0, &mut stack, &mut plan) {
        let (offset, reason) = resolver
            .failure
            .unwrap_or((input.len(), "unbalanced delimiters"));
        debug!("Rejected inline markup {:?}: {} at {}", input, reason, offset);
        return Err(MarkupError::malformed(offset, reason));
    }

    Ok(build_tree(&segments, plan))
}

fn tokenize(input: &str) -> Result<Vec<Segment>, MarkupError> {
    let mut segments = Vec::new();
    let mut chars = input.char_indices();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some((_, escaped)) => push_text(&mut segments, escaped),
                None => return Err(MarkupError::malformed(offset, "dangling escape")),
            },
            '*' | '_' => push_delimiter(&mut segments, offset, ch),
            _ => push_text(&mut segments, ch),
        }
    }

    Ok(segments)
}

fn push_text(segments: &mut Vec<Segment>, ch: char) {
    if !matches!(segments.last(), Some(Segment::Content(_))) {
        segments.push(Segment::Content(Vec::new()));
    }
    if let Some(Segment::Content(pieces)) = segments.last_mut() {
        if ch == '\n' {
            pieces.push(Piece::Break);
            return;
        }
        match pieces.last_mut() {
            Some(Piece::Text(text)) => text.push(ch),
            _ => pieces.push(Piece::Text(ch.to_string())),
        }
    }
}

fn push_delimiter(segments: &mut Vec<Segment>, offset: usize, ch: char) {
    if !matches!(segments.last(), Some(Segment::Delimiters { .. })) {
        segments.push(Segment::Delimiters {
            offset,
            runs: Vec::new(),
        });
    }
    if let Some(Segment::Delimiters { runs, .. }) = segments.last_mut() {
        match (ch, runs.last_mut()) {
            ('*', Some(DelimiterRun::Stars(count))) => *count += 1,
            ('*', _) => runs.push(DelimiterRun::Stars(1)),
            _ => runs.push(DelimiterRun::Underscore),
        }
    }
}

/// All ways to read `count` stars as bold (`**`) and italic (`*`) tokens, bold first
fn star_splits(count: usize) -> Vec<Vec<Style>> {
    if count == 0 {
        return vec![Vec::new()];
    }
    let mut splits = Vec::new();
    if count >= 2 {
        for rest in star_splits(count - 2) {
            let mut split = vec![Style::Bold];
            split.extend(rest);
            splits.push(split);
        }
    }
    for rest in star_splits(count - 1) {
        let mut split = vec![Style::Italic];
        split.extend(rest);
        splits.push(split);
    }
    splits
}

/// Candidate token sequences for a delimiter cluster
fn token_sequences(runs: &[DelimiterRun]) -> Vec<Vec<Style>> {
    let mut sequences = vec![Vec::new()];
    for run in runs {
        let options = match *run {
            DelimiterRun::Underscore => vec![vec![Style::Underline]],
            DelimiterRun::Stars(count) if count <= MAX_STAR_RUN => star_splits(count),
            DelimiterRun::Stars(_) => return Vec::new(),
        };
        sequences = sequences
            .iter()
            .flat_map(|prefix| {
                options.iter().map(move |option| {
                    let mut sequence = prefix.clone();
                    sequence.extend(option.iter().copied());
                    sequence
                })
            })
            .collect();
    }
    sequences
}

/// Apply one token sequence to the open-style stack
fn apply_tokens(stack: &[Style], tokens: &[Style]) -> Result<(Vec<Style>, Vec<Op>), &'static str> {
    let mut stack = stack.to_vec();
    let mut ops = Vec::with_capacity(tokens.len());
    let mut last_closed = None;
    let mut opening = false;

    for &style in tokens {
        if stack.contains(&style) {
            if opening {
                return Err("empty or doubly opened styled run");
            }
            if stack.last() != Some(&style) {
                return Err("overlapping styles");
            }
            stack.pop();
            last_closed = Some(style);
            ops.push(Op::Close(style));
        } else {
            if !opening && last_closed == Some(style) {
                return Err("style closed and reopened");
            }
            opening = true;
            stack.push(style);
            ops.push(Op::Open(style));
        }
    }

    Ok((stack, ops))
}

struct Resolver<'a> {
    segments: &'a [Segment],
    input_len: usize,
    dead: HashSet<(usize, Vec<Style>)>,
    failure: Option<(usize, &'static str)>,
}

impl Resolver<'_> {
    fn record_failure(&mut self, offset: usize, reason: &'static str) {
        match self.failure {
            Some((furthest, _)) if furthest > offset => {}
            _ => self.failure = Some((offset, reason)),
        }
    }

    fn resolve(&mut self, index: usize, stack: &mut Vec<Style>, plan: &mut Vec<Vec<Op>>) -> bool {
        let segments = self.segments;
        let Some(segment) = segments.get(index) else {
            if stack.is_empty() {
                return true;
            }
            self.record_failure(self.input_len, "unclosed style");
            return false;
        };

        let (offset, runs) = match segment {
            Segment::Content(_) => return self.resolve(index + 1, stack, plan),
            Segment::Delimiters { offset, runs } => (*offset, runs),
        };

        if self.dead.contains(&(index, stack.clone())) {
            return false;
        }

        let candidates = token_sequences(runs);
        if candidates.is_empty() {
            self.record_failure(offset, "delimiter run too long");
        }

        for tokens in candidates {
            match apply_tokens(stack, &tokens) {
                Ok((next_stack, ops)) => {
                    let mut next_stack = next_stack;
                    plan.push(ops);
                    if self.resolve(index + 1, &mut next_stack, plan) {
                        *stack = next_stack;
                        return true;
                    }
                    plan.pop();
                }
                Err(reason) => self.record_failure(offset, reason),
            }
        }

        self.dead.insert((index, stack.clone()));
        false
    }
}

fn current<'a>(
    root: &'a mut Vec<StyledNode>,
    open: &'a mut [(Style, Vec<StyledNode>)],
) -> &'a mut Vec<StyledNode> {
    match open.last_mut() {
        Some((_, children)) => children,
        None => root,
    }
}

fn build_tree(segments: &[Segment], plan: Vec<Vec<Op>>) -> StyledNode {
    let mut root = Vec::new();
    let mut open: Vec<(Style, Vec<StyledNode>)> = Vec::new();
    let mut clusters = plan.into_iter();

    for segment in segments {
        match segment {
            Segment::Content(pieces) => {
                let target = current(&mut root, &mut open);
                for piece in pieces {
                    target.push(match piece {
                        Piece::Text(text) => StyledNode::text(text.clone()),
                        Piece::Break => StyledNode::line_break(),
                    });
                }
            }
            Segment::Delimiters { .. } => {
                let Some(ops) = clusters.next() else { continue };
                for op in ops {
                    match op {
                        Op::Open(style) => open.push((style, Vec::new())),
                        Op::Close(_) => {
                            if let Some((style, children)) = open.pop() {
                                current(&mut root, &mut open)
                                    .push(StyledNode::span(StyleFlags::only(style), children));
                            }
                        }
                    }
                }
            }
        }
    }

    StyledNode::paragraph(root)
}
