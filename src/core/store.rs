//! Translation file storage.
//!
//! Each language lives in its own flat JSON object, `<messages_root>/<lang>.json`.
//! Keys are literal source strings and may contain dots, so there is no nesting.

use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, warn};

use super::{
    chain::{Chain, FanOut},
    messages::{LanguageCode, TranslationMap, TranslationSet},
};

/// Reads and merge-writes per-language translation maps.
pub trait TranslationStore: Send + Sync {
    /// Read one map per supported language; languages without data yield an empty map.
    fn read_all(&self) -> BoxFuture<'_, Result<TranslationSet>>;

    /// Merge `partial` into what is persisted.
    ///
    /// Keys not present in `partial` survive; keys present in both take the
    /// incoming value.
    fn merge(&self, partial: TranslationSet) -> BoxFuture<'_, Result<()>>;
}

/// Action taken on a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
    Unchanged,
}

/// Counts of key actions for one merge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
}

impl MergeStats {
    fn record(&mut self, action: KeyAction) {
        match action {
            KeyAction::Added => self.added += 1,
            KeyAction::Updated => self.updated += 1,
            KeyAction::Unchanged => {}
        }
    }
}

/// Translation store backed by one JSON file per language.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
    languages: Vec<LanguageCode>,
}

impl JsonStore {
    /// Create a store for `languages` under `root`.
    ///
    /// Language codes become file names, so each one is validated first.
    pub fn new(root: impl Into<PathBuf>, languages: Vec<LanguageCode>) -> Result<Self> {
        let languages = Ok::<_, anyhow::Error>(languages).fan_out_void(|language| {
            validate_language_code(language)
                .map_err(|msg| anyhow::anyhow!("Invalid language '{}': {}", language, msg))
        })?;

        Ok(Self {
            root: root.into(),
            languages,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn languages(&self) -> &[LanguageCode] {
        &self.languages
    }

    pub fn file_path(&self, language: &str) -> PathBuf {
        self.root.join(format!("{}.json", language))
    }

    /// Read one language file; a missing file is an empty map.
    pub async fn read_language(&self, language: &str) -> Result<TranslationMap> {
        let path = self.file_path(language);
        let file = JsonFile::open_or_create(&path).await?;
        Ok(file.translations())
    }

    /// Merge `translations` into one language file and save it.
    pub async fn merge_language(
        &self,
        language: &str,
        translations: TranslationMap,
    ) -> Result<MergeStats> {
        let path = self.file_path(language);
        let mut file = JsonFile::open_or_create(&path).await?;

        let mut stats = MergeStats::default();
        for (key, value) in translations {
            stats.record(file.set(key, value));
        }
        file.save().await?;

        debug!(
            language,
            path = %path.display(),
            added = stats.added,
            updated = stats.updated,
            "merged translation file"
        );
        Ok(stats)
    }
}

impl TranslationStore for JsonStore {
    fn read_all(&self) -> BoxFuture<'_, Result<TranslationSet>> {
        Chain::<_, anyhow::Error>::ok(self.languages.clone())
            .fan_out(move |language| {
                Chain::new(async move {
                    let translations = self.read_language(&language).await?;
                    Ok::<_, anyhow::Error>((language, translations))
                })
            })
            .map(|entries| entries.into_iter().collect::<TranslationSet>())
            .run()
            .boxed()
    }

    fn merge(&self, partial: TranslationSet) -> BoxFuture<'_, Result<()>> {
        async move {
            for (language, translations) in partial {
                validate_language_code(&language)
                    .map_err(|msg| anyhow::anyhow!("Invalid language '{}': {}", language, msg))?;
                self.merge_language(&language, translations).await?;
            }
            Ok(())
        }
        .boxed()
    }
}

/// Validate a language code before it is used as a file name.
///
/// Only allows alphanumeric characters, hyphens, and underscores, which keeps
/// the resulting path inside the messages directory.
pub fn validate_language_code(language: &str) -> Result<(), String> {
    if language.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }
    if !language
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(
            "Language code can only contain letters, numbers, hyphens, and underscores"
                .to_string(),
        );
    }
    Ok(())
}

/// One flat JSON translation file, kept in its on-disk key order.
struct JsonFile {
    path: PathBuf,
    data: Map<String, Value>,
}

impl JsonFile {
    /// Open an existing JSON file or start an empty one.
    async fn open_or_create(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path).await {
            Ok(content) => parse_object(&content, path)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read file: {}", path.display()));
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// String entries of the file; other value types are skipped.
    fn translations(&self) -> TranslationMap {
        self.data
            .iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key.clone(), s.clone())),
                _ => {
                    warn!(
                        key = %key,
                        path = %self.path.display(),
                        "skipping non-string translation value"
                    );
                    None
                }
            })
            .collect()
    }

    fn set(&mut self, key: String, value: String) -> KeyAction {
        let action = match self.data.get(&key) {
            Some(Value::String(existing)) if *existing == value => return KeyAction::Unchanged,
            Some(_) => KeyAction::Updated,
            None => KeyAction::Added,
        };
        self.data.insert(key, Value::String(value));
        action
    }

    /// Save with 2-space indentation and a trailing newline.
    async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(&self.data).context("Failed to serialize JSON")?;

        fs::write(&self.path, format!("{}\n", content))
            .await
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;

        Ok(())
    }
}

fn parse_object(content: &str, path: &Path) -> Result<Map<String, Value>> {
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_str(content)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("Root of JSON file must be an object: {}", path.display()),
    }
}
