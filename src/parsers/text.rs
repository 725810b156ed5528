/// Flattens raw document text into a single whitespace-normalized string.
///
/// The text is:
/// - Split into lines
/// - Trimmed line by line
/// - Split into fragments wherever two or more spaces appear
/// - Stripped of empty fragments
/// - Joined back together with single spaces
///
/// Single spaces inside a fragment are kept as they are.
pub fn normalize(text: &str) -> String {
    text.split(is_line_break)
        .map(str::trim)
        .flat_map(split_fragments)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a trimmed line on runs of two or more spaces, dropping empty pieces
pub fn split_fragments(line: &str) -> impl Iterator<Item = &str> {
    line.split("  ")
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
}

/// Keeps the first `max_chars` characters of `text`.
///
/// Counts characters rather than bytes so multi-byte text is never cut
/// mid-codepoint. No attempt is made to stop at a word boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Applies an optional length cap
pub fn limit(text: String, max_chars: Option<usize>) -> String {
    match max_chars {
        Some(max) => truncate_chars(&text, max),
        None => text,
    }
}

/// Line boundaries recognised when flattening text.
///
/// Covers `\n`, `\r`, vertical tab, form feed, the ASCII file/group/record
/// separators, NEL and the Unicode line/paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}
