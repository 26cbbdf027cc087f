//! Turns marked-up plain text into bounded book pages.
//!
//! - `markup` translates the legacy `&` codes into section-sign codes or tags.
//! - `pagination` splits text into pages bounded in code points.
//! - `decode` turns page markup into tokens, keeping broken pages as text.
//! - `book` runs the classic or modern pipeline end to end.
//! - `title`, `text_utils`, `source` and `config` support those.

pub mod book;
pub mod config;
pub mod decode;
pub mod markup;
pub mod pagination;
pub mod source;
pub mod text_utils;
pub mod title;

pub use book::{Book, BookPrinter};
pub use pagination::{SplitOptions, SplitStrategy, split};
