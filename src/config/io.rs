use super::models::BookConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> BookConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return BookConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!(
                mode = %cfg.mode,
                strategy = %cfg.split_strategy,
                "Parsed configuration from disk"
            );
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            BookConfig::default()
        }
    }
}

/// Parse the table layout of `conf/config.toml`.
pub fn parse_config(contents: &str) -> Result<BookConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Failed to parse config TOML")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &BookConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use crate::markup::Dialect;
    use crate::pagination::SplitStrategy;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(parse_config("").unwrap(), BookConfig::default());
    }

    #[test]
    fn reads_every_table() {
        let cfg = parse_config(
            r#"
            [book]
            mode = "Modern"
            max_file_bytes = 1024
            title_max_chars = 16
            data_dir = "library"

            [source]
            allow_subdirs = true

            [classic]
            max_chars_per_page = 256
            split_strategy = "lines"
            page_marker = "==="
            max_lines_per_page = 10
            preserve_newlines = false
            trim_trailing_empty_pages = true

            [modern]
            trim_whitespace = true
            page_break_token = "<page>"

            [logging]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.mode, Dialect::Modern);
        assert_eq!(cfg.max_file_bytes, 1024);
        assert_eq!(cfg.title_max_chars, 16);
        assert_eq!(cfg.author_max_chars, 32);
        assert_eq!(cfg.data_dir, "library");
        assert!(cfg.allow_subdirs);
        assert!(!cfg.allow_absolute_paths);
        assert_eq!(cfg.split_strategy, SplitStrategy::Lines);
        assert_eq!(cfg.page_marker, "===");
        assert!(cfg.trim_whitespace);
        assert_eq!(cfg.page_break_token, "<page>");
        assert_eq!(cfg.line_break_token, "\\n");
        assert_eq!(cfg.log_level, LogLevel::Debug);

        let options = cfg.split_options();
        assert_eq!(options.max_chars_per_page, 256);
        assert_eq!(options.max_lines_per_page, 10);
        assert!(!options.preserve_newlines);
        assert!(options.trim_trailing_empty_pages);
    }

    #[test]
    fn unknown_names_fall_back_instead_of_failing() {
        let cfg = parse_config(
            r#"
            [book]
            mode = "fancy"

            [classic]
            split_strategy = "zigzag"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.mode, Dialect::Classic);
        assert_eq!(cfg.split_strategy, SplitStrategy::Smart);
    }

    #[test]
    fn degenerate_limits_are_clamped() {
        let cfg = parse_config(
            r#"
            [classic]
            max_chars_per_page = -4
            max_lines_per_page = 0
            "#,
        )
        .unwrap();
        let options = cfg.split_options();
        assert_eq!(options.max_chars_per_page, 1);
        assert_eq!(options.max_lines_per_page, 1);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config("[classic\nmax_chars_per_page = 3").is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("bookpager-config-that-does-not-exist.toml");
        assert_eq!(load_config(&path), BookConfig::default());
    }

    #[test]
    fn serialized_config_parses_back() {
        let cfg = BookConfig {
            mode: Dialect::Modern,
            split_strategy: SplitStrategy::Hard,
            max_chars_per_page: 99,
            ..BookConfig::default()
        };
        let text = serialize_config(&cfg).unwrap();
        assert!(text.contains("[classic]"));
        assert!(text.contains("split_strategy = \"hard\""));
        assert_eq!(parse_config(&text).unwrap(), cfg);
    }
}
