use thiserror::Error;

use super::{chain::FromPanic, messages::LanguageCode};

/// Failures captured inside the translation pipeline.
///
/// None of these escape `add_missing_translations`; they are logged there.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The translation store could not be loaded.
    #[error("failed to read translations: {0:#}")]
    Read(#[source] anyhow::Error),

    /// The default language has no entry in the translation set.
    #[error("default language '{0}' is not present in the translation set")]
    MissingDefaultLanguage(LanguageCode),

    /// A single model call failed; the whole language is abandoned.
    #[error("failed to translate {key:?} into '{language}': {source:#}")]
    Translate {
        language: LanguageCode,
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Persisting a language's translations failed.
    #[error("failed to write translations for '{language}': {source:#}")]
    Write {
        language: LanguageCode,
        #[source]
        source: anyhow::Error,
    },

    /// An unexpected fault caught at the chain boundary.
    #[error("translation pipeline panicked: {0}")]
    Panicked(String),
}

impl FromPanic for PipelineError {
    fn from_panic(message: String) -> Self {
        Self::Panicked(message)
    }
}
