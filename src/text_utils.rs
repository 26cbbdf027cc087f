//! Code point helpers shared by the splitter, the title formatter and the
//! book assembly.
//!
//! Every size bound in this crate is measured in Unicode scalar values, never
//! in bytes. Slicing a `&str` by byte index is only safe on a `char` boundary,
//! so everything that cuts text goes through [`byte_offset`] or
//! [`truncate_codepoints`].

/// Number of Unicode code points in `s`.
pub fn codepoint_count(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset just past the first `n` code points of `s`, or `s.len()` when
/// `s` is shorter than that.
pub fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(idx, _)| idx)
}

/// Clip `s` to at most `max_codepoints` code points.
///
/// The result is always a prefix of `s` ending on a `char` boundary, so a
/// multi-byte character straddling the limit is dropped whole rather than
/// split. A limit of zero yields the empty string.
pub fn truncate_codepoints(s: &str, max_codepoints: usize) -> &str {
    if max_codepoints == 0 {
        return "";
    }
    &s[..byte_offset(s, max_codepoints)]
}

/// Drop trailing `\n` and `\r` characters.
pub fn trim_trailing_newlines(s: &str) -> &str {
    s.trim_end_matches(['\n', '\r'])
}
