use super::defaults;
use super::models::{BookConfig, LogLevel};
use crate::markup::Dialect;
use crate::pagination::SplitStrategy;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    book: BookTable,
    #[serde(default)]
    source: SourceTable,
    #[serde(default)]
    classic: ClassicTable,
    #[serde(default)]
    modern: ModernTable,
    #[serde(default)]
    logging: LoggingTable,
}

impl From<ConfigTables> for BookConfig {
    fn from(tables: ConfigTables) -> Self {
        BookConfig {
            mode: tables.book.mode,
            max_file_bytes: tables.book.max_file_bytes,
            title_max_chars: tables.book.title_max_chars,
            author_max_chars: tables.book.author_max_chars,
            data_dir: tables.book.data_dir,
            allow_subdirs: tables.source.allow_subdirs,
            allow_absolute_paths: tables.source.allow_absolute_paths,
            max_chars_per_page: tables.classic.max_chars_per_page,
            split_strategy: tables.classic.split_strategy,
            page_marker: tables.classic.page_marker,
            max_lines_per_page: tables.classic.max_lines_per_page,
            preserve_newlines: tables.classic.preserve_newlines,
            trim_trailing_empty_pages: tables.classic.trim_trailing_empty_pages,
            trim_whitespace: tables.modern.trim_whitespace,
            page_break_token: tables.modern.page_break_token,
            line_break_token: tables.modern.line_break_token,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&BookConfig> for ConfigTables {
    fn from(config: &BookConfig) -> Self {
        ConfigTables {
            book: BookTable {
                mode: config.mode,
                max_file_bytes: config.max_file_bytes,
                title_max_chars: config.title_max_chars,
                author_max_chars: config.author_max_chars,
                data_dir: config.data_dir.clone(),
            },
            source: SourceTable {
                allow_subdirs: config.allow_subdirs,
                allow_absolute_paths: config.allow_absolute_paths,
            },
            classic: ClassicTable {
                max_chars_per_page: config.max_chars_per_page,
                split_strategy: config.split_strategy,
                page_marker: config.page_marker.clone(),
                max_lines_per_page: config.max_lines_per_page,
                preserve_newlines: config.preserve_newlines,
                trim_trailing_empty_pages: config.trim_trailing_empty_pages,
            },
            modern: ModernTable {
                trim_whitespace: config.trim_whitespace,
                page_break_token: config.page_break_token.clone(),
                line_break_token: config.line_break_token.clone(),
            },
            logging: LoggingTable {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct BookTable {
    #[serde(default)]
    mode: Dialect,
    #[serde(default = "defaults::default_max_file_bytes")]
    max_file_bytes: u64,
    #[serde(default = "defaults::default_title_max_chars")]
    title_max_chars: usize,
    #[serde(default = "defaults::default_author_max_chars")]
    author_max_chars: usize,
    #[serde(default = "defaults::default_data_dir")]
    data_dir: String,
}

impl Default for BookTable {
    fn default() -> Self {
        BookTable {
            mode: Dialect::default(),
            max_file_bytes: defaults::default_max_file_bytes(),
            title_max_chars: defaults::default_title_max_chars(),
            author_max_chars: defaults::default_author_max_chars(),
            data_dir: defaults::default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct SourceTable {
    #[serde(default)]
    allow_subdirs: bool,
    #[serde(default)]
    allow_absolute_paths: bool,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ClassicTable {
    #[serde(default = "defaults::default_max_chars_per_page")]
    max_chars_per_page: i64,
    #[serde(default)]
    split_strategy: SplitStrategy,
    #[serde(default = "defaults::default_page_marker")]
    page_marker: String,
    #[serde(default = "defaults::default_max_lines_per_page")]
    max_lines_per_page: i64,
    #[serde(default = "defaults::default_preserve_newlines")]
    preserve_newlines: bool,
    #[serde(default)]
    trim_trailing_empty_pages: bool,
}

impl Default for ClassicTable {
    fn default() -> Self {
        ClassicTable {
            max_chars_per_page: defaults::default_max_chars_per_page(),
            split_strategy: SplitStrategy::default(),
            page_marker: defaults::default_page_marker(),
            max_lines_per_page: defaults::default_max_lines_per_page(),
            preserve_newlines: defaults::default_preserve_newlines(),
            trim_trailing_empty_pages: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ModernTable {
    #[serde(default)]
    trim_whitespace: bool,
    #[serde(default = "defaults::default_page_break_token")]
    page_break_token: String,
    #[serde(default = "defaults::default_line_break_token")]
    line_break_token: String,
}

impl Default for ModernTable {
    fn default() -> Self {
        ModernTable {
            trim_whitespace: false,
            page_break_token: defaults::default_page_break_token(),
            line_break_token: defaults::default_line_break_token(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingTable {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingTable {
    fn default() -> Self {
        LoggingTable {
            log_level: defaults::default_log_level(),
        }
    }
}
