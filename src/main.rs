//! Entry point for the book printer.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Resolve and read the source text file.
//! - Compose the book and print it as JSON on stdout.

use anyhow::{Context, Result, anyhow};
use bookpager::BookPrinter;
use bookpager::config::load_config;
use bookpager::source::{read_source, resolve_source};
use std::env;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const FALLBACK_AUTHOR: &str = "Unknown";

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let (file_name, author) = parse_args()?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        file = %file_name,
        mode = %config.mode,
        strategy = %config.split_strategy,
        "Starting book printer"
    );

    let data_dir = Path::new(&config.data_dir);
    let policy = config.source_policy();
    let path = resolve_source(data_dir, &file_name, &policy)
        .with_context(|| format!("Cannot use source `{file_name}`"))?;
    let text = read_source(&path, policy.max_file_bytes)
        .with_context(|| format!("Cannot read {}", path.display()))?;

    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(file_name);
    let book = BookPrinter::new(config).compose(&text, &source_name, &author);

    let json = serde_json::to_string_pretty(&book).context("Failed to serialize book")?;
    println!("{json}");
    Ok(())
}

fn parse_args() -> Result<(String, String)> {
    let mut args = env::args().skip(1);
    let file_name = args
        .next()
        .ok_or_else(|| anyhow!("Usage: bookpager <file> [author...]"))?;

    let rest: Vec<String> = args.collect();
    let author = if rest.is_empty() {
        env::var("USER").unwrap_or_else(|_| FALLBACK_AUTHOR.to_string())
    } else {
        rest.join(" ")
    };
    Ok((file_name, author))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    }
}
