//! Core types, traits, and Hebrew text handling for the tanna corpus
//! question-answering library.
//!
//! This crate defines the shared interfaces ([`LexicalStore`]), the text
//! normalizer, the canonical-name taxonomy of the three collections
//! (Scripture, Mishnah, Babylonian Talmud), the live [`WorkRegistry`], error
//! types, and tracing conventions used across all tanna crates.
//!
//! It has minimal external dependencies and is intended to be depended on by
//! every other crate in the workspace.

pub mod error;
pub mod normalize;
pub mod registry;
pub mod store;
pub mod taxonomy;
pub mod tracing_config;

pub use error::{TannaError, TannaResult};
pub use normalize::{
    NormalizedText, expand_prefixes, normalize_query_input, normalize_text, tokenize,
};
pub use registry::WorkRegistry;
pub use store::{LexicalStore, ScopeFilter, SegmentRow, WorkCount};
pub use taxonomy::{CollectionType, display_work_name};
