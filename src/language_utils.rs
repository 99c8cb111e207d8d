//! Language utilities for subtitle language codes
//!
//! Subtitle languages are tagged like `en`, `pt-br` or `zh_hant`: an ISO
//! 639-1 or ISO 639-3 primary code, optionally followed by a region or
//! script subtag. Only the primary code is checked.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Primary language subtag, lowercased
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn lookup(code: &str) -> Option<Language> {
    let primary = primary_subtag(code);
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
}

/// Validate that a subtitle language code has a known primary language
pub fn validate_language_code(code: &str) -> Result<()> {
    lookup(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// English name of the primary language
pub fn get_language_name(code: &str) -> Result<String> {
    let language = lookup(code).ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
    Ok(language.to_name().to_string())
}
