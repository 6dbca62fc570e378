//! Missing-key detection between the default language and the others.

use super::{
    error::PipelineError,
    messages::{LanguageEntry, TranslationMap, TranslationSet},
};

/// The default language's entry and every other language's entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub default: LanguageEntry,
    pub others: Vec<LanguageEntry>,
}

/// Keys of `default` that `target` lacks or holds an empty value for.
///
/// Values are copied from `default` untranslated. An empty string in `target`
/// is treated exactly like an absent key.
pub fn missing_translations(default: &TranslationMap, target: &TranslationMap) -> TranslationMap {
    default
        .iter()
        .filter(|(key, _)| target.get(*key).is_none_or(|value| value.is_empty()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Split a translation set into the default language and the rest.
///
/// Fails with [`PipelineError::MissingDefaultLanguage`] when the default
/// language has no entry. `others` follows the set's key order, which callers
/// should not rely on.
pub fn split_default_and_others(
    default_language: &str,
    mut set: TranslationSet,
) -> Result<Partition, PipelineError> {
    let translations = set
        .remove(default_language)
        .ok_or_else(|| PipelineError::MissingDefaultLanguage(default_language.to_string()))?;

    let others = set
        .into_iter()
        .map(|(language, translations)| LanguageEntry::new(language, translations))
        .collect();

    Ok(Partition {
        default: LanguageEntry::new(default_language, translations),
        others,
    })
}

/// Reduce every non-default entry to the keys it is missing.
pub fn extract_missing_translations(partition: &Partition) -> Vec<LanguageEntry> {
    partition
        .others
        .iter()
        .map(|entry| {
            LanguageEntry::new(
                entry.language.clone(),
                missing_translations(&partition.default.translations, &entry.translations),
            )
        })
        .collect()
}
