//! Small shared helpers.

/// Truncates a string to at most `max` characters.
///
/// Counts characters, not bytes, so multi-byte glyphs (box drawing,
/// braille art) are never split mid-sequence.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Number of characters in a string (not bytes).
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
