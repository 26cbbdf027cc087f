use crate::markup::{Dialect, ModernTokens};
use crate::pagination::{SplitOptions, SplitStrategy};
use crate::source::SourcePolicy;
use serde::Deserialize;

/// Resolved book-printing configuration.
///
/// On disk the settings are grouped into `[book]`, `[source]`, `[classic]`,
/// `[modern]` and `[logging]` tables; this is the flattened view the rest of
/// the crate works with.
#[derive(Debug, Clone, PartialEq)]
pub struct BookConfig {
    pub mode: Dialect,
    pub max_file_bytes: u64,
    pub title_max_chars: usize,
    pub author_max_chars: usize,
    pub data_dir: String,
    pub allow_subdirs: bool,
    pub allow_absolute_paths: bool,
    /// Signed so that `0` or negative values survive loading and get clamped
    /// by [`BookConfig::split_options`] instead of rejecting the file.
    pub max_chars_per_page: i64,
    pub split_strategy: SplitStrategy,
    pub page_marker: String,
    pub max_lines_per_page: i64,
    pub preserve_newlines: bool,
    pub trim_trailing_empty_pages: bool,
    pub trim_whitespace: bool,
    pub page_break_token: String,
    pub line_break_token: String,
    pub log_level: LogLevel,
}

impl Default for BookConfig {
    fn default() -> Self {
        BookConfig {
            mode: Dialect::Classic,
            max_file_bytes: crate::config::defaults::default_max_file_bytes(),
            title_max_chars: crate::config::defaults::default_title_max_chars(),
            author_max_chars: crate::config::defaults::default_author_max_chars(),
            data_dir: crate::config::defaults::default_data_dir(),
            allow_subdirs: false,
            allow_absolute_paths: false,
            max_chars_per_page: crate::config::defaults::default_max_chars_per_page(),
            split_strategy: SplitStrategy::Smart,
            page_marker: crate::config::defaults::default_page_marker(),
            max_lines_per_page: crate::config::defaults::default_max_lines_per_page(),
            preserve_newlines: crate::config::defaults::default_preserve_newlines(),
            trim_trailing_empty_pages: false,
            trim_whitespace: false,
            page_break_token: crate::config::defaults::default_page_break_token(),
            line_break_token: crate::config::defaults::default_line_break_token(),
            log_level: crate::config::defaults::default_log_level(),
        }
    }
}

impl BookConfig {
    /// Splitter settings for the classic pipeline, with non-positive limits
    /// clamped to 1.
    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            max_chars_per_page: clamp_limit(self.max_chars_per_page),
            strategy: self.split_strategy,
            page_marker: self.page_marker.clone(),
            max_lines_per_page: clamp_limit(self.max_lines_per_page),
            preserve_newlines: self.preserve_newlines,
            trim_trailing_empty_pages: self.trim_trailing_empty_pages,
        }
    }

    pub fn modern_tokens(&self) -> ModernTokens {
        ModernTokens {
            page_break: self.page_break_token.clone(),
            line_break: self.line_break_token.clone(),
        }
    }

    pub fn source_policy(&self) -> SourcePolicy {
        SourcePolicy {
            allow_subdirs: self.allow_subdirs,
            allow_absolute_paths: self.allow_absolute_paths,
            max_file_bytes: self.max_file_bytes,
        }
    }
}

fn clamp_limit(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0).max(1)
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
