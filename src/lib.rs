//! Gulgle - bang shortcuts for the browser's search field.
//!
//! Typing `!w rust` into the browser's search field produces a search engine
//! URL. Gulgle recognizes that URL, finds the `!w` bang and rewrites the
//! navigation to the bang's target (here Wikipedia) with the rest of the query.
//!
//! # Architecture
//!
//! - [`bang`] - Entry and match types, form normalization
//! - [`services`] - Catalog store, validator, trigger index, parser, redirect
//!   builder, search engine detection, Kagi conversion
//! - [`host`] - Native messaging host used by the browser extension
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use gulgle::services::{CatalogPaths, CatalogStore};
//!
//! let store = CatalogStore::new(CatalogPaths::in_dir(std::path::Path::new("/tmp/gulgle")));
//! if let Some((bang, url)) = store.parser().resolve("weather !w today") {
//!     println!("!{} -> {}", bang.matched_trigger, url);
//! }
//! ```

pub mod bang;
pub mod cli;
pub mod config;
pub mod host;
pub mod services;

mod error;

// Re-export commonly used types for convenience
pub use bang::{BangDraft, BangEntry, BangMatch};
pub use config::Config;
pub use error::{CatalogError, GulgleError, GulgleResult, StorageError, ValidationError};
pub use host::{check_search_url, Host, NativeResponse};
pub use services::{BangParser, CatalogStore, SearchEngine};
