use std::{
    collections::BTreeSet,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::store::validate_language_code;

pub const CONFIG_FILE_NAME: &str = ".lingorc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_default_language")]
    pub default_language: String,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_messages_root")]
    pub messages_root: String,
    #[serde(default = "default_function_names")]
    pub function_names: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Settings for the chat-completions backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_default_language() -> String {
    "en".to_string()
}

fn default_languages() -> Vec<String> {
    vec![default_default_language()]
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_messages_root() -> String {
    "./messages".to_string()
}

fn default_function_names() -> Vec<String> {
    vec!["t".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: default_default_language(),
            languages: default_languages(),
            source_root: default_source_root(),
            includes: default_includes(),
            ignores: default_ignores(),
            messages_root: default_messages_root(),
            function_names: default_function_names(),
            ignore_test_files: default_ignore_test_files(),
            backend: BackendConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// One problem found while validating a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration:{}", format_issues(.0))]
    Invalid(Vec<FieldIssue>),
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues.iter().map(|issue| format!("\n  - {}", issue)).collect()
}

impl Config {
    /// Validate configuration values.
    ///
    /// Every problem is reported, not just the first one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();

        if self.languages.is_empty() {
            issues.push(FieldIssue::new(
                "languages",
                "must list at least one language",
            ));
        }

        let mut seen = BTreeSet::new();
        for (index, language) in self.languages.iter().enumerate() {
            let field = format!("languages[{}]", index);
            if let Err(msg) = validate_language_code(language) {
                issues.push(FieldIssue::new(field, format!("\"{}\": {}", language, msg)));
            } else if !seen.insert(language.as_str()) {
                issues.push(FieldIssue::new(
                    field,
                    format!("\"{}\" is listed more than once", language),
                ));
            }
        }

        if let Err(msg) = validate_language_code(&self.default_language) {
            issues.push(FieldIssue::new(
                "defaultLanguage",
                format!("\"{}\": {}", self.default_language, msg),
            ));
        } else if !self.languages.contains(&self.default_language) {
            issues.push(FieldIssue::new(
                "defaultLanguage",
                format!("\"{}\" is not listed in 'languages'", self.default_language),
            ));
        }

        for pattern in &self.ignores {
            if let Err(e) = Pattern::new(pattern) {
                issues.push(FieldIssue::new(
                    "ignores",
                    format!("invalid glob pattern \"{}\": {}", pattern, e),
                ));
            }
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if (pattern.contains('*') || pattern.contains('?'))
                && let Err(e) = Pattern::new(pattern)
            {
                issues.push(FieldIssue::new(
                    "includes",
                    format!("invalid glob pattern \"{}\": {}", pattern, e),
                ));
            }
        }

        if self.function_names.is_empty() {
            issues.push(FieldIssue::new(
                "functionNames",
                "must list at least one function name",
            ));
        }
        for name in &self.function_names {
            if !is_valid_function_name(name) {
                issues.push(FieldIssue::new(
                    "functionNames",
                    format!("\"{}\" is not a valid function name", name),
                ));
            }
        }

        if !(self.backend.base_url.starts_with("http://")
            || self.backend.base_url.starts_with("https://"))
        {
            issues.push(FieldIssue::new(
                "backend.baseUrl",
                format!("\"{}\" must be an http(s) URL", self.backend.base_url),
            ));
        }
        if self.backend.model.trim().is_empty() {
            issues.push(FieldIssue::new("backend.model", "cannot be empty"));
        }
        if self.backend.api_key_env.trim().is_empty() {
            issues.push(FieldIssue::new("backend.apiKeyEnv", "cannot be empty"));
        }
        if self.backend.timeout_secs == 0 {
            issues.push(FieldIssue::new(
                "backend.timeoutSecs",
                "must be greater than zero",
            ));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }

    /// Languages other than the default one, in config order.
    pub fn target_languages(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .map(String::as_str)
            .filter(move |language| *language != self.default_language)
    }
}

/// A dotted identifier path such as `t` or `i18n.t`.
fn is_valid_function_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

/// Command-line values that take precedence over the config file.
///
/// Paths are relative to the working directory the command runs in.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub default_language: Option<String>,
    pub messages_root: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut Config, start_dir: &Path) {
        if let Some(language) = &self.default_language {
            config.default_language = language.clone();
        }
        if let Some(root) = &self.messages_root {
            config.messages_root = start_dir.join(root).to_string_lossy().into_owned();
        }
        if let Some(root) = &self.source_root {
            config.source_root = start_dir.join(root).to_string_lossy().into_owned();
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config came from, `None` when using defaults.
    pub config_path: Option<PathBuf>,
    /// Directory that relative paths in the config resolve against.
    pub base_dir: PathBuf,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.config_path.is_some()
    }

    pub fn source_root(&self) -> PathBuf {
        self.base_dir.join(&self.config.source_root)
    }

    pub fn messages_root(&self) -> PathBuf {
        self.base_dir.join(&self.config.messages_root)
    }
}

pub fn load_config(
    start_dir: &Path,
    overrides: &ConfigOverrides,
) -> Result<ConfigLoadResult, ConfigError> {
    let (mut config, config_path) = match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let config: Config =
                serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;
            (config, Some(path))
        }
        None => (Config::default(), None),
    };

    overrides.apply(&mut config, start_dir);
    config.validate()?;

    let base_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(start_dir)
        .to_path_buf();

    Ok(ConfigLoadResult {
        config,
        config_path,
        base_dir,
    })
}
