//! Display strings derived from the source file and the requester.

use crate::text_utils::truncate_codepoints;
use unicode_normalization::UnicodeNormalization;

/// Title used when nothing usable is left of the file name.
pub const DEFAULT_TITLE: &str = "Book";

/// Derive a display title from a file name.
///
/// `books/my_old-book.txt` becomes `My Old Book`. Directory prefixes (either
/// separator) and the final extension are dropped, `_` and `-` become spaces,
/// whitespace runs collapse, and each word is title-cased. File names coming
/// from decomposing filesystems are composed to NFC first so accented letters
/// case as one code point. Never returns an empty string and never contains a
/// newline; length is left to the caller.
pub fn title_from_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let base = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };

    let composed: String = base.nfc().collect();
    let title = composed
        .replace(['_', '-'], " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Flatten an author name onto one line and bound its length.
pub fn sanitize_author(raw: &str, max_chars: usize) -> String {
    let flat = raw.replace(['\r', '\n'], " ");
    truncate_codepoints(flat.trim(), max_chars).trim_end().to_string()
}
