use std::collections::BTreeMap;

/// Language identifier such as `"en"` or `"zh-CN"`.
pub type LanguageCode = String;

/// Translation key (the literal source text) to translated value, for one language.
///
/// For the default language every value equals its key.
pub type TranslationMap = BTreeMap<String, String>;

/// Translations for every supported language, indexed by language code.
pub type TranslationSet = BTreeMap<LanguageCode, TranslationMap>;

/// One language and its translations, the unit passed through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    pub language: LanguageCode,
    pub translations: TranslationMap,
}

impl LanguageEntry {
    pub fn new(language: impl Into<LanguageCode>, translations: TranslationMap) -> Self {
        Self {
            language: language.into(),
            translations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

/// Build the default-language map for a set of extracted strings (key == value).
pub fn identity_map<I, S>(keys: I) -> TranslationMap
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    keys.into_iter()
        .map(|key| {
            let key = key.into();
            (key.clone(), key)
        })
        .collect()
}
