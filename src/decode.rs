//! Per-page markup decoding with a literal fallback.
//!
//! A decoder turns one page of markup into a flat [`Token`] stream. Decoding
//! is allowed to fail (a page cut can land inside an escape sequence, and
//! authors write broken tags), but a page is never lost: [`decode_page`]
//! downgrades any failure to the undecoded text.

use crate::markup::{SECTION, known_color, known_tag, tag_for_code};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// One element of a decoded page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Token {
    Text(String),
    /// Named colour or format, by canonical tag name (`red`, `bold`).
    Style(&'static str),
    /// `#RRGGBB`, upper-cased.
    Hex(String),
    /// Closing tag for a named style, or `color` for any colour.
    Close(&'static str),
    Reset,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unclosed tag starting at byte {0}")]
    UnclosedTag(usize),
    #[error("empty tag at byte {0}")]
    EmptyTag(usize),
    #[error("unknown tag <{0}>")]
    UnknownTag(String),
    #[error("invalid hex colour `{0}`")]
    InvalidHex(String),
    #[error("incomplete hex colour sequence at byte {0}")]
    IncompleteHex(usize),
    #[error("format escape with no code at byte {0}")]
    DanglingEscape(usize),
}

/// Structured decode of one page of markup.
pub trait MarkupDecoder {
    fn decode(&self, raw: &str) -> Result<Vec<Token>, DecodeError>;
}

impl<F> MarkupDecoder for F
where
    F: Fn(&str) -> Result<Vec<Token>, DecodeError>,
{
    fn decode(&self, raw: &str) -> Result<Vec<Token>, DecodeError> {
        self(raw)
    }
}

/// A page after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodedPage {
    Formatted { text: String, tokens: Vec<Token> },
    /// Decoding failed; `text` is shown as-is.
    Literal { text: String },
}

impl DecodedPage {
    /// The page's markup as it went into the decoder.
    pub fn text(&self) -> &str {
        match self {
            DecodedPage::Formatted { text, .. } | DecodedPage::Literal { text } => text,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, DecodedPage::Literal { .. })
    }

    /// Visible text with all formatting removed.
    pub fn plain_text(&self) -> String {
        match self {
            DecodedPage::Formatted { tokens, .. } => tokens
                .iter()
                .filter_map(|token| match token {
                    Token::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
            DecodedPage::Literal { text } => text.clone(),
        }
    }
}

/// Decode `raw`, falling back to literal text on any error.
pub fn decode_page<D: MarkupDecoder + ?Sized>(decoder: &D, raw: &str) -> DecodedPage {
    match decoder.decode(raw) {
        Ok(tokens) => DecodedPage::Formatted {
            text: raw.to_string(),
            tokens,
        },
        Err(err) => {
            warn!(error = %err, "Page markup failed to decode; keeping literal text");
            DecodedPage::Literal {
                text: raw.to_string(),
            }
        }
    }
}

/// Decoder for section-sign codes produced by the classic pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDecoder;

impl MarkupDecoder for LegacyDecoder {
    fn decode(&self, raw: &str) -> Result<Vec<Token>, DecodeError> {
        let mut out = TokenBuf::default();
        let mut chars = raw.char_indices();

        while let Some((offset, ch)) = chars.next() {
            if ch != SECTION {
                out.push_char(ch);
                continue;
            }
            let Some((_, code)) = chars.next() else {
                return Err(DecodeError::DanglingEscape(offset));
            };

            if code.eq_ignore_ascii_case(&'x') {
                let mut hex = String::with_capacity(7);
                hex.push('#');
                for _ in 0..6 {
                    match (chars.next(), chars.next()) {
                        (Some((_, SECTION)), Some((_, digit))) if digit.is_ascii_hexdigit() => {
                            hex.push(digit.to_ascii_uppercase());
                        }
                        _ => return Err(DecodeError::IncompleteHex(offset)),
                    }
                }
                out.push(Token::Hex(hex));
                continue;
            }

            match tag_for_code(code) {
                Some("reset") => out.push(Token::Reset),
                Some(tag) => out.push(Token::Style(tag)),
                None => {
                    out.push_char(SECTION);
                    out.push_char(code);
                }
            }
        }

        Ok(out.finish())
    }
}

/// Strict decoder for bracketed modern tags.
///
/// Accepts `<name>` / `</name>` for the table's styles, `<reset>`,
/// `<color:#RRGGBB>`, `<color:name>`, `<#RRGGBB>` and `</color>`. `\<` is a
/// literal `<`. Anything else inside angle brackets is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagDecoder;

impl MarkupDecoder for TagDecoder {
    fn decode(&self, raw: &str) -> Result<Vec<Token>, DecodeError> {
        let mut out = TokenBuf::default();
        let mut chars = raw.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '\\' if matches!(chars.peek(), Some((_, '<'))) => {
                    chars.next();
                    out.push_char('<');
                }
                '<' => {
                    let body_start = offset + 1;
                    let end = match raw[body_start..].find(['<', '>']) {
                        Some(pos) if raw[body_start + pos..].starts_with('>') => body_start + pos,
                        _ => return Err(DecodeError::UnclosedTag(offset)),
                    };
                    out.push(parse_tag(&raw[body_start..end], offset)?);
                    while chars.next_if(|&(idx, _)| idx <= end).is_some() {}
                }
                other => out.push_char(other),
            }
        }

        Ok(out.finish())
    }
}

fn parse_tag(body: &str, offset: usize) -> Result<Token, DecodeError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(DecodeError::EmptyTag(offset));
    }
    let name = body.to_ascii_lowercase();

    if let Some(closing) = name.strip_prefix('/') {
        let closing = closing.trim();
        if closing == "color" || closing.starts_with('#') {
            return Ok(Token::Close("color"));
        }
        return match known_tag(closing) {
            Some(tag) if tag != "reset" => Ok(Token::Close(tag)),
            _ => Err(DecodeError::UnknownTag(body.to_string())),
        };
    }

    if let Some(value) = name.strip_prefix("color:") {
        let value = value.trim();
        if value.starts_with('#') {
            return hex_token(value, body);
        }
        return known_color(value)
            .map(Token::Style)
            .ok_or_else(|| DecodeError::UnknownTag(body.to_string()));
    }

    if name.starts_with('#') {
        return hex_token(&name, body);
    }

    match known_tag(&name) {
        Some("reset") => Ok(Token::Reset),
        Some(tag) => Ok(Token::Style(tag)),
        None => Err(DecodeError::UnknownTag(body.to_string())),
    }
}

fn hex_token(value: &str, body: &str) -> Result<Token, DecodeError> {
    let digits = &value[1..];
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(Token::Hex(value.to_ascii_uppercase()))
    } else {
        Err(DecodeError::InvalidHex(body.to_string()))
    }
}

/// Collects runs of plain text between formatting tokens.
#[derive(Default)]
struct TokenBuf {
    tokens: Vec<Token>,
    text: String,
}

impl TokenBuf {
    fn push_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    fn push(&mut self, token: Token) {
        self.flush();
        self.tokens.push(token);
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.tokens.push(Token::Text(std::mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush();
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    #[test]
    fn legacy_decodes_styles_and_reset() {
        let tokens = LegacyDecoder.decode("§cRed §LBold§r plain").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Style("red"),
                text("Red "),
                Token::Style("bold"),
                text("Bold"),
                Token::Reset,
                text(" plain"),
            ]
        );
    }

    #[test]
    fn legacy_decodes_hex_run() {
        let tokens = LegacyDecoder.decode("§x§f§f§0§0§A§aHi").unwrap();
        assert_eq!(tokens, vec![Token::Hex("#FF00AA".to_string()), text("Hi")]);
    }

    #[test]
    fn legacy_keeps_unknown_codes_literally() {
        let tokens = LegacyDecoder.decode("§zoo").unwrap();
        assert_eq!(tokens, vec![text("§zoo")]);
    }

    #[test]
    fn legacy_rejects_cut_sequences() {
        assert_eq!(
            LegacyDecoder.decode("ab§x§f§f"),
            Err(DecodeError::IncompleteHex(2))
        );
        assert_eq!(LegacyDecoder.decode("tail§"), Err(DecodeError::DanglingEscape(4)));
    }

    #[test]
    fn tags_decode_styles_colours_and_closers() {
        let tokens = TagDecoder
            .decode("<green>Go <color:#12abEF>hex</color> <BOLD>b</bold><reset>")
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Style("green"),
                text("Go "),
                Token::Hex("#12ABEF".to_string()),
                text("hex"),
                Token::Close("color"),
                text(" "),
                Token::Style("bold"),
                text("b"),
                Token::Close("bold"),
                Token::Reset,
            ]
        );
    }

    #[test]
    fn tags_accept_named_colour_and_bare_hex() {
        let tokens = TagDecoder.decode("<color:gold>a<#000000>b").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Style("gold"),
                text("a"),
                Token::Hex("#000000".to_string()),
                text("b"),
            ]
        );
    }

    #[test]
    fn escaped_angle_bracket_is_text() {
        let tokens = TagDecoder.decode("1 \\<2> 3").unwrap();
        assert_eq!(tokens, vec![text("1 <2> 3")]);
    }

    #[test]
    fn malformed_tags_are_errors() {
        assert_eq!(TagDecoder.decode("a <bold"), Err(DecodeError::UnclosedTag(2)));
        assert_eq!(TagDecoder.decode("a <b <bold>"), Err(DecodeError::UnclosedTag(2)));
        assert_eq!(TagDecoder.decode("<>"), Err(DecodeError::EmptyTag(0)));
        assert_eq!(
            TagDecoder.decode("<sparkle>"),
            Err(DecodeError::UnknownTag("sparkle".to_string()))
        );
        assert_eq!(
            TagDecoder.decode("<color:#12345>"),
            Err(DecodeError::InvalidHex("color:#12345".to_string()))
        );
        assert_eq!(
            TagDecoder.decode("<color:bold>"),
            Err(DecodeError::UnknownTag("color:bold".to_string()))
        );
    }

    #[test]
    fn open_tag_without_close_is_well_formed() {
        assert_eq!(
            decode_page(&TagDecoder, "<red>unclosed"),
            DecodedPage::Formatted {
                text: "<red>unclosed".to_string(),
                tokens: vec![Token::Style("red"), Token::Text("unclosed".to_string())],
            }
        );
    }

    #[test]
    fn decode_page_falls_back_to_literal() {
        let fixtures = ["<red>fine</red>", "<red>broken</sparkle>", "", "plain"];
        let pages: Vec<DecodedPage> = fixtures
            .iter()
            .map(|raw| decode_page(&TagDecoder, raw))
            .collect();

        assert_eq!(pages.len(), fixtures.len());
        assert!(!pages[0].is_literal());
        assert_eq!(pages[0].plain_text(), "fine");
        assert!(pages[1].is_literal());
        assert_eq!(pages[1].text(), "<red>broken</sparkle>");
        assert_eq!(pages[1].plain_text(), "<red>broken</sparkle>");
        assert_eq!(
            pages[2],
            DecodedPage::Formatted {
                text: String::new(),
                tokens: Vec::new()
            }
        );
        assert_eq!(pages[3].plain_text(), "plain");
    }

    #[test]
    fn closures_can_stand_in_for_decoders() {
        let always_fails = |_: &str| -> Result<Vec<Token>, DecodeError> {
            Err(DecodeError::EmptyTag(0))
        };
        let page = decode_page(&always_fails, "anything");
        assert_eq!(
            page,
            DecodedPage::Literal {
                text: "anything".to_string()
            }
        );
    }
}
