//! Prompt composition around a raw text-in/text-out model backend.

use anyhow::Result;
use futures::future::BoxFuture;

use super::messages::{LanguageCode, LanguageEntry};

/// Marker separating the instructions from the text to translate.
pub const TEXT_MARKER: &str = "\n\nText:\n";

/// A generative text backend: one prompt in, one plain-text reply out.
///
/// Implementations do their own transport; there is no retry or rate
/// limiting on top of them.
pub trait TextBackend: Send + Sync {
    fn send(&self, prompt: String) -> BoxFuture<'_, Result<String>>;
}

/// Build the instruction sent to the model for one piece of text.
pub fn compose_prompt(text: &str, source: &str, target: &str) -> String {
    format!(
        "You are a professional translator localizing the user interface of a software product.\n\
         Translate the text below from {source} to {target}.\n\
         Use natural, idiomatic {target} that reads as if it was written for the product.\n\
         Keep placeholders, HTML tags and markup unchanged.\n\
         If the text is empty, return nothing.\n\
         Return only the translated text, without explanations, notes or quotation marks.\
         {TEXT_MARKER}{text}"
    )
}

/// A translation function for one (source, target) language pair.
#[derive(Clone)]
pub struct Translator<'a> {
    source: LanguageCode,
    target: LanguageCode,
    backend: &'a dyn TextBackend,
}

impl Translator<'_> {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn prompt(&self, text: &str) -> String {
        compose_prompt(text, &self.source, &self.target)
    }

    /// Translate `text` with exactly one backend call.
    pub async fn translate(&self, text: &str) -> Result<String> {
        self.backend.send(self.prompt(text)).await
    }
}

pub fn create_translator<'a>(
    source: &str,
    target: &str,
    backend: &'a dyn TextBackend,
) -> Translator<'a> {
    Translator {
        source: source.to_string(),
        target: target.to_string(),
        backend,
    }
}

/// A language entry paired with the translator that fills it in.
pub struct BoundTranslator<'a> {
    pub entry: LanguageEntry,
    pub translator: Translator<'a>,
}

/// Bind `entry` to a translator from `default_language` into `entry.language`.
pub fn add_translator<'a>(
    default_language: &str,
    backend: &'a dyn TextBackend,
    entry: LanguageEntry,
) -> BoundTranslator<'a> {
    let translator = create_translator(default_language, &entry.language, backend);
    BoundTranslator { entry, translator }
}
