/*!
 * Normalization of timed-text styling attributes into style flags.
 *
 * Attribute names are matched case-insensitively and with or without a
 * namespace prefix, so `fontWeight`, `fontweight` and `tts:fontWeight`
 * all select the same flag.
 */

use log::trace;

use super::node::{Style, StyleFlags};

/// Normalized attribute name, the value that activates it, and the flag it maps to
const STYLE_ATTRIBUTES: [(&str, &str, Style); 3] = [
    ("fontweight", "bold", Style::Bold),
    ("fontstyle", "italic", Style::Italic),
    ("textdecoration", "underline", Style::Underline),
];

/// Lowercase an attribute name and strip any namespace prefix
pub fn normalize_attribute_name(name: &str) -> String {
    let local = match name.rfind(':') {
        Some(index) => &name[index + 1..],
        None => name,
    };
    local.to_ascii_lowercase()
}

/// Style selected by one attribute, if any
pub fn style_for_attribute(name: &str, value: &str) -> Option<Style> {
    let normalized = normalize_attribute_name(name);
    let (_, expected, style) = STYLE_ATTRIBUTES
        .iter()
        .find(|(attribute, _, _)| *attribute == normalized)?;

    // textDecoration may list several decorations
    let active = value
        .split_whitespace()
        .any(|token| token.eq_ignore_ascii_case(expected));

    if active {
        Some(*style)
    } else {
        trace!("Ignoring style attribute {}=\"{}\"", name, value);
        None
    }
}

impl StyleFlags {
    /// Derive flags from a span's attribute list; unknown attributes are ignored
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut flags = StyleFlags::default();
        for (name, value) in attributes {
            if let Some(style) = style_for_attribute(name, value) {
                flags.insert(style);
            }
        }
        flags
    }
}
