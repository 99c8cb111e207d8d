/*!
 * Inline markup for subtitle cue content.
 *
 * Cue text is edited as a compact inline markup (`**bold**`, `*italic*`,
 * `_underline_`, `\n` for line breaks) and exchanged as a timed-text styled
 * tree. This module converts between the two.
 *
 * - `node`: the styled tree and style flags
 * - `attributes`: timed-text attribute normalization into style flags
 * - `render`: tree to inline markup
 * - `parse`: inline markup to tree
 */

pub mod attributes;
pub mod node;
pub mod parse;
pub mod render;

pub use node::{Style, StyleFlags, StyledNode};
pub use parse::from_inline_markup;
pub use render::{escape_text, render_nodes, to_inline_markup};
