/*!
 * Styled tree to inline markup.
 *
 * The renderer tracks the stack of styles that is open in the output and,
 * before every leaf, closes and opens delimiters until that stack matches
 * the styles active at the leaf. Neighbouring leaves that share styles
 * therefore share delimiters.
 */

use super::node::{Style, StyledNode};

/// Render a paragraph (or any node) as inline markup
pub fn to_inline_markup(node: &StyledNode) -> String {
    render_nodes(std::slice::from_ref(node))
}

/// Render a forest of nodes as one inline markup string
pub fn render_nodes(nodes: &[StyledNode]) -> String {
    let mut renderer = InlineRenderer::default();
    let mut active = Vec::new();
    for node in nodes {
        renderer.walk(node, &mut active);
    }
    renderer.finish()
}

/// Escape characters that would otherwise be read as delimiters
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        if matches!(ch, '\\' | '*' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
}

#[derive(Default)]
struct InlineRenderer {
    out: String,
    open: Vec<Style>,
}

impl InlineRenderer {
    fn walk(&mut self, node: &StyledNode, active: &mut Vec<Style>) {
        match node {
            StyledNode::Text { text } => {
                if text.is_empty() {
                    return;
                }
                self.sync(active);
                push_escaped(&mut self.out, text);
            }
            StyledNode::LineBreak => {
                self.sync(active);
                self.out.push('\n');
            }
            StyledNode::Paragraph { children } => {
                for child in children {
                    self.walk(child, active);
                }
            }
            StyledNode::Span { style, children } => {
                let depth = active.len();
                // A style inherited from an enclosing span is not wrapped twice
                for flag in style.iter() {
                    if !active.contains(&flag) {
                        active.push(flag);
                    }
                }
                for child in children {
                    self.walk(child, active);
                }
                active.truncate(depth);
            }
        }
    }

    fn sync(&mut self, desired: &[Style]) {
        let shared = self
            .open
            .iter()
            .zip(desired)
            .take_while(|(open, wanted)| open == wanted)
            .count();

        while self.open.len() > shared {
            if let Some(style) = self.open.pop() {
                self.out.push_str(style.delimiter());
            }
        }
        for style in &desired[shared..] {
            self.out.push_str(style.delimiter());
            self.open.push(*style);
        }
    }

    fn finish(mut self) -> String {
        self.sync(&[]);
        self.out
    }
}
