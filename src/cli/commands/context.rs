use std::{env, path::Path};

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::args::CommonArgs;
use crate::config::{Config, ConfigLoadResult, load_config};
use crate::core::{
    Dependencies, JsonStore, TextBackend,
    scan::{ScanOptions, ScanReport, scan_codebase},
};

/// Everything a project command needs: resolved config plus the message store.
pub struct ProjectContext {
    pub loaded: ConfigLoadResult,
    pub store: JsonStore,
}

impl ProjectContext {
    /// Load the project around the current working directory.
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to get current directory")?;
        Self::load(&cwd, common)
    }

    pub fn load(start_dir: &Path, common: &CommonArgs) -> Result<Self> {
        let loaded = load_config(start_dir, &common.overrides())?;
        match &loaded.config_path {
            Some(path) => debug!(path = %path.display(), "loaded config"),
            None => debug!("no config file found, using defaults"),
        }

        let store = JsonStore::new(loaded.messages_root(), loaded.config.languages.clone())?;
        Ok(Self { loaded, store })
    }

    pub fn config(&self) -> &Config {
        &self.loaded.config
    }

    pub fn default_language(&self) -> &str {
        &self.loaded.config.default_language
    }

    /// Scan the configured sources for literal keys.
    pub fn scan(&self) -> Result<ScanReport> {
        let config = self.config();
        let source_root = self.loaded.source_root();
        scan_codebase(&ScanOptions {
            source_root: &source_root,
            includes: &config.includes,
            ignores: &config.ignores,
            ignore_test_files: config.ignore_test_files,
            function_names: &config.function_names,
        })
        .context("Failed to build key extractor")
    }

    pub fn dependencies<'a>(&'a self, backend: &'a dyn TextBackend) -> Dependencies<'a> {
        Dependencies {
            store: &self.store,
            backend,
        }
    }
}
