use crate::pagination::{
    DEFAULT_MAX_CHARS_PER_PAGE, DEFAULT_MAX_LINES_PER_PAGE, DEFAULT_PAGE_MARKER,
};

pub(crate) fn default_max_file_bytes() -> u64 {
    2 * 1024 * 1024
}

pub(crate) fn default_title_max_chars() -> usize {
    32
}

pub(crate) fn default_author_max_chars() -> usize {
    32
}

pub(crate) fn default_data_dir() -> String {
    "books".to_string()
}

pub(crate) fn default_max_chars_per_page() -> i64 {
    DEFAULT_MAX_CHARS_PER_PAGE as i64
}

pub(crate) fn default_page_marker() -> String {
    DEFAULT_PAGE_MARKER.to_string()
}

pub(crate) fn default_max_lines_per_page() -> i64 {
    DEFAULT_MAX_LINES_PER_PAGE as i64
}

pub(crate) fn default_preserve_newlines() -> bool {
    true
}

pub(crate) fn default_page_break_token() -> String {
    crate::markup::DEFAULT_PAGE_BREAK_TOKEN.to_string()
}

pub(crate) fn default_line_break_token() -> String {
    crate::markup::DEFAULT_LINE_BREAK_TOKEN.to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}
