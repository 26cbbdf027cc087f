//! Translation between the two markup dialects.
//!
//! The legacy dialect writes formatting as `&` followed by one code character
//! (`&c` for red, `&l` for bold) plus `&#RRGGBB` for arbitrary colours. The
//! classic pipeline rewrites those into section-sign codes (`§c`,
//! `§x§R§R§G§G§B§B`); the modern pipeline rewrites them into bracketed tags
//! (`<red>`, `<color:#RRGGBB>`). Unrecognised `&x` sequences are left as they
//! are.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Section sign used by the classic dialect.
pub const SECTION: char = '§';
/// Default literal token that separates pages in modern text.
pub const DEFAULT_PAGE_BREAK_TOKEN: &str = "\\Line-break\\";
/// Default literal token that stands for a line break in modern text.
pub const DEFAULT_LINE_BREAK_TOKEN: &str = "\\n";

/// Legacy code characters and the modern tag each one maps to.
pub const LEGACY_CODES: [(char, &str); 22] = [
    ('0', "black"),
    ('1', "dark_blue"),
    ('2', "dark_green"),
    ('3', "dark_aqua"),
    ('4', "dark_red"),
    ('5', "dark_purple"),
    ('6', "gold"),
    ('7', "gray"),
    ('8', "dark_gray"),
    ('9', "blue"),
    ('a', "green"),
    ('b', "aqua"),
    ('c', "red"),
    ('d', "light_purple"),
    ('e', "yellow"),
    ('f', "white"),
    ('k', "obfuscated"),
    ('l', "bold"),
    ('m', "strikethrough"),
    ('n', "underline"),
    ('o', "italic"),
    ('r', "reset"),
];

static LEGACY_TAGS: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| LEGACY_CODES.iter().copied().collect());
static TAG_NAMES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LEGACY_CODES.iter().map(|&(_, tag)| (tag, tag)).collect());

static RE_LEGACY_HEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"&#([A-Fa-f0-9]{6})").unwrap());
static RE_LEGACY_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)&([0-9a-fk-or])").unwrap());

/// Target dialect of a translation, and the pipeline a book is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Dialect {
    #[default]
    Classic,
    Modern,
}

impl Dialect {
    /// Lenient lookup by name; anything but `modern` is classic.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("modern") {
            Dialect::Modern
        } else {
            Dialect::Classic
        }
    }
}

impl From<String> for Dialect {
    fn from(value: String) -> Self {
        Dialect::from_name(&value)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Dialect::Classic => "classic",
            Dialect::Modern => "modern",
        };
        write!(f, "{}", label)
    }
}

/// Modern tag name for a legacy code character, in either case.
pub fn tag_for_code(code: char) -> Option<&'static str> {
    LEGACY_TAGS.get(&code.to_ascii_lowercase()).copied()
}

/// Canonical `'static` form of a modern tag name, if it is one of the table's.
pub fn known_tag(name: &str) -> Option<&'static str> {
    TAG_NAMES.get(name).copied()
}

/// Like [`known_tag`], restricted to the sixteen named colours.
pub fn known_color(name: &str) -> Option<&'static str> {
    LEGACY_CODES[..16]
        .iter()
        .find(|(_, tag)| *tag == name)
        .map(|&(_, tag)| tag)
}

/// Rewrite legacy codes in `text` into `dialect`.
///
/// Carriage returns are dropped first, then `&#RRGGBB` colours, then the
/// single-character codes.
pub fn translate(text: &str, dialect: Dialect) -> String {
    let text = text.replace('\r', "");
    let text = RE_LEGACY_HEX.replace_all(&text, |caps: &Captures| match dialect {
        Dialect::Classic => classic_hex(&caps[1]),
        Dialect::Modern => format!("<color:#{}>", &caps[1]),
    });
    RE_LEGACY_CODE
        .replace_all(&text, |caps: &Captures| {
            let code = caps[1].chars().next().unwrap_or_default();
            match (dialect, tag_for_code(code)) {
                (Dialect::Classic, Some(_)) => format!("{SECTION}{}", code.to_ascii_lowercase()),
                (Dialect::Modern, Some(tag)) => format!("<{tag}>"),
                (_, None) => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn classic_hex(hex: &str) -> String {
    let mut out = String::with_capacity(2 + hex.len() * 2);
    out.push(SECTION);
    out.push('x');
    for digit in hex.chars() {
        out.push(SECTION);
        out.push(digit);
    }
    out
}

/// Tokens that shape modern text before it is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModernTokens {
    pub page_break: String,
    pub line_break: String,
}

impl Default for ModernTokens {
    fn default() -> Self {
        ModernTokens {
            page_break: DEFAULT_PAGE_BREAK_TOKEN.to_string(),
            line_break: DEFAULT_LINE_BREAK_TOKEN.to_string(),
        }
    }
}

/// Translate `text` into modern tags and cut it on the page-break token.
///
/// Each segment is trimmed; a segment left empty stays in the sequence as an
/// empty page. Line-break tokens in non-empty segments become `\n`.
pub fn modern_segments(text: &str, tokens: &ModernTokens) -> Vec<String> {
    let translated = translate(text, Dialect::Modern);
    let segments: Vec<&str> = if tokens.page_break.is_empty() {
        vec![translated.as_str()]
    } else {
        translated.split(tokens.page_break.as_str()).collect()
    };

    segments
        .into_iter()
        .map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                String::new()
            } else {
                expand_line_breaks(segment, &tokens.line_break)
            }
        })
        .collect()
}

/// Replace every literal `token` in `text` with a newline. A backslash in
/// front of the default token survives: `\\n` becomes `\` and a newline.
pub fn expand_line_breaks(text: &str, token: &str) -> String {
    if token.is_empty() {
        return text.to_string();
    }
    text.replace(token, "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_twenty_two_unique_codes() {
        assert_eq!(LEGACY_TAGS.len(), 22);
        assert_eq!(TAG_NAMES.len(), 22);
        assert_eq!(tag_for_code('C'), Some("red"));
        assert_eq!(tag_for_code('r'), Some("reset"));
        assert_eq!(tag_for_code('x'), None);
    }

    #[test]
    fn classic_rewrites_codes_to_section_sign() {
        assert_eq!(translate("&cRed &LBold", Dialect::Classic), "§cRed §lBold");
    }

    #[test]
    fn classic_rewrites_hex_per_nibble() {
        assert_eq!(
            translate("&#FF00aaHi", Dialect::Classic),
            "§x§F§F§0§0§a§aHi"
        );
    }

    #[test]
    fn modern_rewrites_codes_and_hex_to_tags() {
        assert_eq!(
            translate("&#12ABef&6gold&Oit&r", Dialect::Modern),
            "<color:#12ABef><gold>gold<italic>it<reset>"
        );
    }

    #[test]
    fn unknown_codes_are_left_alone() {
        assert_eq!(
            translate("fish & chips &z &#12345", Dialect::Classic),
            "fish & chips &z &#12345"
        );
        assert_eq!(translate("&g&#GGGGGG", Dialect::Modern), "&g&#GGGGGG");
    }

    #[test]
    fn carriage_returns_are_stripped() {
        assert_eq!(translate("a\r\nb\r", Dialect::Classic), "a\nb");
    }

    #[test]
    fn dialect_names_are_lenient() {
        assert_eq!(Dialect::from_name("MODERN"), Dialect::Modern);
        assert_eq!(Dialect::from_name("classic"), Dialect::Classic);
        assert_eq!(Dialect::from_name("whatever"), Dialect::Classic);
    }

    #[test]
    fn modern_segments_split_trim_and_keep_empties() {
        let text = "  &aFirst\\nline \\Line-break\\ \\Line-break\\&lLast";
        let pages = modern_segments(text, &ModernTokens::default());
        assert_eq!(pages, vec!["<green>First\nline", "", "<bold>Last"]);
    }

    #[test]
    fn modern_segments_without_page_token_is_one_page() {
        let tokens = ModernTokens {
            page_break: String::new(),
            ..ModernTokens::default()
        };
        assert_eq!(modern_segments(" a \\Line-break\\ b ", &tokens), vec!["a \\Line-break\\ b"]);
    }

    #[test]
    fn doubled_line_break_escape_keeps_one_backslash() {
        assert_eq!(expand_line_breaks("a\\\\nb\\nc", "\\n"), "a\\\nb\nc");
        assert_eq!(expand_line_breaks("a|b", "|"), "a\nb");
        assert_eq!(expand_line_breaks("a\\nb", ""), "a\\nb");
    }
}
