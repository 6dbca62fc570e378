//! Core translation engine.
//!
//! - `chain`: success/failure chaining and fan-out
//! - `diff`: default/other partitioning and missing-key computation
//! - `translator` / `runner`: per-language model calls
//! - `pipeline`: the end-to-end orchestration
//! - `store`: per-language JSON persistence
//! - `scan`: literal key extraction from source files

pub mod chain;
pub mod diff;
pub mod error;
pub mod messages;
pub mod pipeline;
pub mod runner;
pub mod scan;
pub mod store;
pub mod translator;

pub use chain::{Chain, FanOut, FromPanic, attempt};
pub use diff::{Partition, extract_missing_translations, missing_translations, split_default_and_others};
pub use error::PipelineError;
pub use messages::{LanguageCode, LanguageEntry, TranslationMap, TranslationSet, identity_map};
pub use pipeline::{Dependencies, PipelineSummary, add_missing_translations, try_add_missing_translations};
pub use store::{JsonStore, TranslationStore};
pub use translator::{BoundTranslator, TextBackend, Translator, add_translator, create_translator};
