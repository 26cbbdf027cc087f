//! Page splitting.
//!
//! Text is cut into pages whose length, counted in code points, never exceeds
//! the configured bound. Four strategies decide where the cuts fall:
//!
//! - `marker`: cut on every occurrence of a literal marker string.
//! - `lines`: group a fixed number of input lines per page.
//! - `hard`: fixed-size chunks with no regard for words.
//! - `smart`: greedy fill that backs off to the nearest newline or space.
//!
//! `marker` and `lines` hand any unit that is still too large to `smart`, which
//! never recurses, so the fallback is at most one level deep. Every page passes
//! through the code point truncator before it is appended, whatever strategy
//! produced it.

use crate::text_utils::{byte_offset, codepoint_count, trim_trailing_newlines, truncate_codepoints};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default page bound for the classic book pipeline.
pub const DEFAULT_MAX_CHARS_PER_PAGE: usize = 165;
/// Default line budget for the `lines` strategy.
pub const DEFAULT_MAX_LINES_PER_PAGE: usize = 14;
/// Default marker for the `marker` strategy.
pub const DEFAULT_PAGE_MARKER: &str = "---PAGE---";

/// Algorithm used to decide where page boundaries fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SplitStrategy {
    Marker,
    Lines,
    Hard,
    #[default]
    Smart,
}

impl SplitStrategy {
    /// Lenient lookup by name. Unknown names select `smart`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "marker" => SplitStrategy::Marker,
            "lines" => SplitStrategy::Lines,
            "hard" => SplitStrategy::Hard,
            "smart" => SplitStrategy::Smart,
            other => {
                warn!(strategy = other, "Unknown split strategy; using smart");
                SplitStrategy::Smart
            }
        }
    }
}

impl From<String> for SplitStrategy {
    fn from(value: String) -> Self {
        SplitStrategy::from_name(&value)
    }
}

impl std::fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SplitStrategy::Marker => "marker",
            SplitStrategy::Lines => "lines",
            SplitStrategy::Hard => "hard",
            SplitStrategy::Smart => "smart",
        };
        write!(f, "{}", label)
    }
}

/// Settings for one call to [`split`].
///
/// Zero limits are not errors: `max_chars_per_page` and `max_lines_per_page`
/// are clamped to 1, and an empty `page_marker` makes `marker` behave like
/// `smart`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    pub max_chars_per_page: usize,
    pub strategy: SplitStrategy,
    pub page_marker: String,
    pub max_lines_per_page: usize,
    pub preserve_newlines: bool,
    pub trim_trailing_empty_pages: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        SplitOptions {
            max_chars_per_page: DEFAULT_MAX_CHARS_PER_PAGE,
            strategy: SplitStrategy::Smart,
            page_marker: DEFAULT_PAGE_MARKER.to_string(),
            max_lines_per_page: DEFAULT_MAX_LINES_PER_PAGE,
            preserve_newlines: true,
            trim_trailing_empty_pages: false,
        }
    }
}

/// Maximum number of trailing code points `smart` gives up from a full page to
/// land the cut on a newline or space.
pub fn boundary_threshold(max_chars_per_page: usize) -> usize {
    (max_chars_per_page / 8).max(3)
}

/// Split `text` into pages according to `options`.
///
/// Always returns at least one page; empty input yields a single empty page.
pub fn split(text: &str, options: &SplitOptions) -> Vec<String> {
    let pager = Pager::new(options);
    let mut pages = Vec::new();

    match options.strategy {
        SplitStrategy::Marker => pager.split_marker(text, &mut pages),
        SplitStrategy::Lines => pager.split_lines(text, &mut pages),
        SplitStrategy::Hard => pager.split_hard(text, &mut pages),
        SplitStrategy::Smart => pager.split_smart(text, &mut pages),
    }

    if options.trim_trailing_empty_pages {
        trim_trailing_empty_pages(&mut pages);
    }

    debug!(
        strategy = %options.strategy,
        max_chars = pager.max_chars,
        input_bytes = text.len(),
        pages = pages.len(),
        "Split text into pages"
    );
    pages
}

/// Options with degenerate values already clamped.
struct Pager<'a> {
    max_chars: usize,
    max_lines: usize,
    threshold: usize,
    marker: &'a str,
    preserve_newlines: bool,
}

impl<'a> Pager<'a> {
    fn new(options: &'a SplitOptions) -> Self {
        let max_chars = options.max_chars_per_page.max(1);
        Pager {
            max_chars,
            max_lines: options.max_lines_per_page.max(1),
            threshold: boundary_threshold(max_chars),
            marker: &options.page_marker,
            preserve_newlines: options.preserve_newlines,
        }
    }

    fn split_marker(&self, text: &str, pages: &mut Vec<String>) {
        if self.marker.is_empty() {
            self.split_smart(text, pages);
            return;
        }
        for segment in text.split(self.marker) {
            self.split_smart(segment, pages);
        }
    }

    fn split_lines(&self, text: &str, pages: &mut Vec<String>) {
        let lines: Vec<&str> = text.split('\n').collect();
        for group in lines.chunks(self.max_lines) {
            let page = group.join("\n");
            if codepoint_count(&page) <= self.max_chars {
                self.push_page(&page, pages);
            } else {
                self.split_smart(&page, pages);
            }
        }
    }

    fn split_hard(&self, text: &str, pages: &mut Vec<String>) {
        if text.is_empty() {
            pages.push(String::new());
            return;
        }
        let mut rest = text;
        while !rest.is_empty() {
            let end = byte_offset(rest, self.max_chars);
            self.push_page(&rest[..end], pages);
            rest = &rest[end..];
        }
    }

    fn split_smart(&self, text: &str, pages: &mut Vec<String>) {
        if text.is_empty() {
            pages.push(String::new());
            return;
        }
        let mut rest = text;
        while !rest.is_empty() {
            let end = byte_offset(rest, self.max_chars);
            if end >= rest.len() {
                self.push_page(rest, pages);
                break;
            }

            let window = &rest[..end];
            let cut = boundary_cut(window, '\n', self.threshold)
                .or_else(|| boundary_cut(window, ' ', self.threshold))
                .unwrap_or(end);

            self.push_page(&rest[..cut], pages);
            rest = &rest[cut..];
        }
    }

    fn push_page(&self, page: &str, pages: &mut Vec<String>) {
        let page = if self.preserve_newlines {
            page
        } else {
            trim_trailing_newlines(page)
        };
        pages.push(truncate_codepoints(page, self.max_chars).to_string());
    }
}

/// Byte offset just past the last `delimiter` in `window`, provided no more
/// than `threshold` code points follow it.
fn boundary_cut(window: &str, delimiter: char, threshold: usize) -> Option<usize> {
    let after = window.rfind(delimiter)? + delimiter.len_utf8();
    (codepoint_count(&window[after..]) <= threshold).then_some(after)
}

fn trim_trailing_empty_pages(pages: &mut Vec<String>) {
    while pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    if pages.is_empty() {
        pages.push(String::new());
    }
}
