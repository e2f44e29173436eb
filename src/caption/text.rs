use once_cell::sync::Lazy;
use regex::Regex;

// @module: Caption text cleaning

// @const: Anything between angle brackets
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").expect("Invalid tag regex")
});

static NEWLINES_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n+").expect("Invalid newline regex")
});

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex")
});

/// Entities decoded after whitespace normalization, applied in this order
const ENTITY_REPLACEMENTS: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("\u{00a0}", " "),
];

/// Clean raw caption text for display.
///
/// Steps, in order:
/// 1. drop every `<...>` run (a textual filter, not a markup parser)
/// 2. turn newline runs into a single space
/// 3. collapse any whitespace run into a single space
/// 4. trim both ends
/// 5. decode the entity table, one pass per entry
///
/// Decoding is not repeated, so `&amp;lt;` becomes `&lt;` rather than `<`.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = TAG_REGEX.replace_all(text, "");
    let text = NEWLINES_REGEX.replace_all(&text, " ");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");

    let mut cleaned = text.trim().to_string();
    for (entity, literal) in ENTITY_REPLACEMENTS {
        if cleaned.contains(entity) {
            cleaned = cleaned.replace(entity, literal);
        }
    }

    cleaned
}
