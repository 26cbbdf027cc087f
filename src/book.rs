//! Assembly of a printable book from source text.
//!
//! Classic books are translated to section-sign codes, split by the page
//! splitter and decoded with [`LegacyDecoder`]. Modern books are translated to
//! tags, cut on the author's page-break token and decoded with [`TagDecoder`].
//! In both cases a page that fails to decode is kept as literal text.

use crate::config::BookConfig;
use crate::decode::{DecodedPage, LegacyDecoder, MarkupDecoder, TagDecoder, decode_page};
use crate::markup::{Dialect, modern_segments, translate};
use crate::pagination::split;
use crate::text_utils::truncate_codepoints;
use crate::title::{sanitize_author, title_from_filename};
use serde::Serialize;
use tracing::{debug, info};

/// A finished book, ready to hand to whatever delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub mode: Dialect,
    pub pages: Vec<DecodedPage>,
}

impl Book {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages that fell back to literal text.
    pub fn literal_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_literal()).count()
    }
}

#[derive(Debug, Clone)]
pub struct BookPrinter {
    config: BookConfig,
}

impl BookPrinter {
    pub fn new(config: BookConfig) -> Self {
        Self { config }
    }

    /// Build a book using the decoder that matches the configured mode.
    pub fn compose(&self, text: &str, file_name: &str, author: &str) -> Book {
        match self.config.mode {
            Dialect::Classic => self.compose_with(text, file_name, author, &LegacyDecoder),
            Dialect::Modern => self.compose_with(text, file_name, author, &TagDecoder),
        }
    }

    /// Build a book, decoding each page with `decoder`.
    pub fn compose_with<D: MarkupDecoder + ?Sized>(
        &self,
        text: &str,
        file_name: &str,
        author: &str,
        decoder: &D,
    ) -> Book {
        let pages: Vec<DecodedPage> = self
            .raw_pages(text)
            .iter()
            .map(|raw| decode_page(decoder, raw))
            .collect();

        let book = Book {
            title: self.title(file_name),
            author: sanitize_author(author, self.config.author_max_chars),
            mode: self.config.mode,
            pages,
        };
        info!(
            title = %book.title,
            mode = %book.mode,
            pages = book.page_count(),
            literal_pages = book.literal_pages(),
            "Composed book"
        );
        book
    }

    /// Page markup before decoding.
    pub fn raw_pages(&self, text: &str) -> Vec<String> {
        match self.config.mode {
            Dialect::Classic => {
                let translated = translate(text, Dialect::Classic);
                split(&translated, &self.config.split_options())
            }
            Dialect::Modern => {
                let text = if self.config.trim_whitespace {
                    text.trim()
                } else {
                    text
                };
                let segments = modern_segments(text, &self.config.modern_tokens());
                debug!(segments = segments.len(), "Cut modern text on page-break tokens");
                segments
            }
        }
    }

    /// Title for `file_name`, bounded to the configured display length.
    pub fn title(&self, file_name: &str) -> String {
        let title = title_from_filename(file_name);
        truncate_codepoints(&title, self.config.title_max_chars.max(1))
            .trim_end()
            .to_string()
    }
}
