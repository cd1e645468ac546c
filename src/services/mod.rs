pub mod catalog;
pub mod kagi;
pub mod parser;
pub mod redirect;
pub mod search_engine;
pub mod trigger_index;
pub mod validator;

pub use catalog::{BuiltinSource, CatalogPaths, CatalogStore};
pub use parser::BangParser;
pub use redirect::build_redirect;
pub use search_engine::{detect_engine, extract_query, is_native_integration, SearchEngine};
pub use trigger_index::TriggerIndex;
pub use validator::{collision_check, validate};
