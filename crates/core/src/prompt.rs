//! Parsing of `"<percent>% <color>"` caption text into color requests.
//!
//! The tile service receives color mixes as free text such as
//! `"50% red, 30% black, 20% white"`. Percentages are kept as raw weights;
//! the normalizer turns them into fractions later.

use std::sync::OnceLock;

use regex::Regex;

use crate::color::ColorTable;
use crate::error::SynthesisError;
use crate::proportion::ColorSpec;

fn pair_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+(?:[.,]\d+)?)\s*%\s*([\p{L}][\p{L}\- ]*)").expect("color pair pattern is valid")
    })
}

/// Picks the color identifier out of the words following a percentage.
///
/// The longest leading run of words that names a known color or alias wins,
/// so `"зеленая трава tile"` yields `"зеленая трава"`. If no prefix is known
/// the first word is kept and later resolves to the fallback gray.
fn identifier_from_phrase(phrase: &str) -> String {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    (1..=words.len())
        .rev()
        .map(|n| words[..n].join(" "))
        .find(|candidate| ColorTable::canonical(candidate).is_some())
        .unwrap_or_else(|| words.first().copied().unwrap_or_default().to_string())
        .to_lowercase()
}

/// Extracts `(percent, identifier)` pairs from `prompt`, in order.
///
/// An identifier runs from the percent sign up to the next comma, digit or
/// the end of the text; multi-word catalogue names such as `Зеленая трава`
/// are kept whole. Identifiers are lowercased. Returns
/// `SynthesisError::InvalidPrompt` if no pair is found.
pub fn parse_color_prompt(prompt: &str) -> Result<Vec<ColorSpec>, SynthesisError> {
    let colors: Vec<ColorSpec> = pair_pattern()
        .captures_iter(prompt)
        .filter_map(|caps| {
            let percent: f64 = caps[1].replace(',', ".").parse().ok()?;
            Some(ColorSpec::new(identifier_from_phrase(&caps[2]), percent))
        })
        .collect();

    if colors.is_empty() {
        return Err(SynthesisError::InvalidPrompt(format!(
            "no '<percent>% <color>' pairs in '{prompt}'"
        )));
    }
    tracing::debug!(count = colors.len(), "parsed color prompt");
    Ok(colors)
}
