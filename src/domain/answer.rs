/// Characters a model likes to put in front of an answer: list bullets,
/// block-quote markers, stray punctuation and opening quotes.
pub const DECORATIVE_CHARS: [char; 12] = [
    '.', ':', '-', '>', '•', '*', '\u{201C}', '\u{201D}', '"', '\'', '`', ' ',
];

pub fn is_decorative(ch: char) -> bool {
    DECORATIVE_CHARS.contains(&ch)
}

/// Trims the answer and strips leading decoration. Interior and trailing text
/// is left untouched, and the result is stable under repeated application.
pub fn clean_text(raw: &str) -> String {
    let mut rest = raw.trim();

    while let Some(first) = rest.chars().next() {
        if !is_decorative(first) {
            break;
        }
        rest = rest[first.len_utf8()..].trim_start();
    }

    rest.to_string()
}
