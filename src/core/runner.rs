use tracing::{debug, info};

use super::{
    error::PipelineError,
    messages::{LanguageEntry, TranslationMap},
    translator::BoundTranslator,
};

/// Translate every value of one language's missing keys.
///
/// Keys are translated one after another in key order; the next request is
/// only sent once the previous reply arrived. The first failing request
/// abandons the whole language.
pub async fn translate(bound: BoundTranslator<'_>) -> Result<LanguageEntry, PipelineError> {
    let BoundTranslator { entry, translator } = bound;
    let LanguageEntry {
        language,
        translations,
    } = entry;

    let total = translations.len();
    let mut output = TranslationMap::new();

    for (index, (key, value)) in translations.into_iter().enumerate() {
        let translated =
            translator
                .translate(&value)
                .await
                .map_err(|source| PipelineError::Translate {
                    language: language.clone(),
                    key: key.clone(),
                    source,
                })?;
        debug!(
            language = %language,
            key = %key,
            position = index + 1,
            total,
            "translated key"
        );
        output.insert(key, translated);
    }

    if total > 0 {
        info!(language = %language, count = total, "translated missing keys");
    }

    Ok(LanguageEntry::new(language, output))
}
