//! Lingo - fill missing UI translations with a language model
//!
//! Lingo extracts literal `t('...')` strings from a codebase into the default
//! language file, works out which keys every other language is missing, and
//! asks a chat-completions model to translate them. Results are merged into
//! the existing per-language JSON files.
//!
//! ## Module Structure
//!
//! - `backend`: Model backends implementing `core::TextBackend`
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and validation
//! - `core`: Translation pipeline, differ, store and source scanner
//! - `logging`: `tracing` subscriber setup

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod logging;

#[cfg(test)]
mod test_utils;
