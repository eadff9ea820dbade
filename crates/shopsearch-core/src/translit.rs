//! Keyboard-layout helpers.
//!
//! A query typed with the wrong layout active ("ghbdtn" for "привет") is
//! recovered by mapping every character to the one on the same physical key
//! of the other layout.

/// Latin keys, lower row by row, then shifted, then keys shared by both layouts.
const EN_LAYOUT: &str = "`qwertyuiop[]asdfghjkl;'zxcvbnm,./~QWERTYUIOP{}ASDFGHJKL:\"ZXCVBNM<> 0123456789";
/// Cyrillic keys at the same positions as `EN_LAYOUT`.
const RU_LAYOUT: &str = "ёйцукенгшщзхъфывапролджэячсмитьбю.ЁЙЦУКЕНГШЩЗХЪФЫВАПРОЛДЖЭЯЧСМИТЬБЮ 0123456789";

const UNSAFE_CHARS: [char; 5] = ['[', ']', '"', '/', ';'];

/// True iff the whole text is one or more ASCII digits.
pub fn is_numeric(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
}

pub fn contains_cyrillic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}

/// Characters that cannot survive a query parser; their presence means the
/// text was typed in the wrong layout.
pub fn contains_unsafe_chars(text: &str) -> bool {
    text.contains(UNSAFE_CHARS)
}

/// Map `text` to the other keyboard layout. The direction is Cyrillic to
/// Latin when any Cyrillic character is present, Latin to Cyrillic
/// otherwise. Characters missing from the source layout are dropped.
pub fn transliterate(text: &str) -> String {
    let (source, target) = if contains_cyrillic(text) { (RU_LAYOUT, EN_LAYOUT) } else { (EN_LAYOUT, RU_LAYOUT) };
    text.chars()
        .filter_map(|c| source.chars().position(|s| s == c).and_then(|pos| target.chars().nth(pos)))
        .collect()
}
