//! The missing-translation pipeline.
//!
//! read → partition → diff → bind translators → translate (fan-out) → write (fan-out)
//!
//! Every stage runs inside one [`Chain`]. [`add_missing_translations`] is the
//! public entry point: it logs any failure and always returns.

use std::collections::BTreeMap;

use tracing::{debug, error, info};

use super::{
    chain::Chain,
    diff::{extract_missing_translations, split_default_and_others},
    error::PipelineError,
    messages::{LanguageCode, LanguageEntry, TranslationSet},
    runner,
    store::TranslationStore,
    translator::{TextBackend, add_translator},
};

/// Collaborators injected into the pipeline.
#[derive(Clone, Copy)]
pub struct Dependencies<'a> {
    pub store: &'a dyn TranslationStore,
    pub backend: &'a dyn TextBackend,
}

/// What a pipeline run amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineSummary {
    /// Every language was translated and written; counts of keys filled per language.
    Completed {
        translated: BTreeMap<LanguageCode, usize>,
    },
    /// The run failed; the cause has been logged.
    Failed,
}

impl PipelineSummary {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn translated_count(&self) -> usize {
        match self {
            Self::Completed { translated } => translated.values().sum(),
            Self::Failed => 0,
        }
    }
}

/// Partition the set and reduce every other language to its missing keys.
pub fn prepare(
    default_language: &str,
    set: TranslationSet,
) -> Result<Vec<LanguageEntry>, PipelineError> {
    split_default_and_others(default_language, set).map(|partition| {
        debug!(
            default_language,
            keys = partition.default.translations.len(),
            languages = partition.others.len(),
            "partitioned translations"
        );
        let missing = extract_missing_translations(&partition);
        for entry in &missing {
            info!(
                language = %entry.language,
                missing = entry.translations.len(),
                "computed missing keys"
            );
        }
        missing
    })
}

/// Build the full pipeline as one chain; nothing runs until it is awaited.
pub fn missing_translation_chain<'a>(
    default_language: &'a str,
    deps: Dependencies<'a>,
) -> Chain<'a, Vec<LanguageEntry>, PipelineError> {
    let Dependencies { store, backend } = deps;

    Chain::new(store.read_all())
        .map_err(PipelineError::Read)
        .and_then(move |set| Chain::from_result(prepare(default_language, set)))
        .map(move |entries| {
            entries
                .into_iter()
                .map(|entry| add_translator(default_language, backend, entry))
                .collect::<Vec<_>>()
        })
        .fan_out(|bound| Chain::new(runner::translate(bound)))
        .fan_out_void(move |entry| Chain::new(write_entry(store, entry)))
}

/// Run the pipeline and return its outcome without logging failures.
pub async fn try_add_missing_translations(
    default_language: &str,
    deps: Dependencies<'_>,
) -> Result<Vec<LanguageEntry>, PipelineError> {
    missing_translation_chain(default_language, deps).run().await
}

/// Fill every language's missing keys and merge them into the store.
///
/// Never fails: any failure is logged at error level and reported as
/// [`PipelineSummary::Failed`].
pub async fn add_missing_translations(
    default_language: &str,
    deps: Dependencies<'_>,
) -> PipelineSummary {
    info!(default_language, "adding missing translations");

    match try_add_missing_translations(default_language, deps).await {
        Ok(entries) => {
            let translated: BTreeMap<LanguageCode, usize> = entries
                .into_iter()
                .map(|entry| (entry.language, entry.translations.len()))
                .collect();
            info!(
                languages = translated.len(),
                keys = translated.values().sum::<usize>(),
                "missing translations added"
            );
            PipelineSummary::Completed { translated }
        }
        Err(err) => {
            error!(error = %err, "failed to add missing translations");
            PipelineSummary::Failed
        }
    }
}

/// Merge one language's translations into the store.
async fn write_entry(
    store: &dyn TranslationStore,
    entry: LanguageEntry,
) -> Result<(), PipelineError> {
    let LanguageEntry {
        language,
        translations,
    } = entry;
    let count = translations.len();
    let partial: TranslationSet = [(language.clone(), translations)].into_iter().collect();

    store
        .merge(partial)
        .await
        .map_err(|source| PipelineError::Write {
            language: language.clone(),
            source,
        })?;

    debug!(language = %language, count, "wrote translations");
    Ok(())
}
