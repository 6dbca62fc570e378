use std::path::PathBuf;

use crate::cli::exit_status::ExitStatus;
use crate::core::{LanguageCode, PipelineSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Init,
    Extract,
    Status,
    Translate,
}

#[derive(Debug)]
pub enum CommandSummary {
    Init(InitSummary),
    Extract(ExtractSummary),
    Status(StatusSummary),
    Translate(TranslateSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    pub created: bool,
}

#[derive(Debug, Clone)]
pub struct ExtractSummary {
    pub default_language: LanguageCode,
    pub file: PathBuf,
    pub files_scanned: usize,
    pub keys_found: usize,
    /// Keys found in sources but not yet in the default language file.
    pub new_keys: Vec<String>,
    pub unreadable_files: usize,
    pub is_apply: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageStatus {
    pub language: LanguageCode,
    pub missing: usize,
    pub total: usize,
}

#[derive(Debug)]
pub struct StatusSummary {
    pub default_language: LanguageCode,
    pub total_keys: usize,
    pub languages: Vec<LanguageStatus>,
}

impl StatusSummary {
    pub fn missing_count(&self) -> usize {
        self.languages.iter().map(|l| l.missing).sum()
    }
}

#[derive(Debug)]
pub struct TranslateSummary {
    pub extract: Option<ExtractSummary>,
    pub pipeline: PipelineSummary,
}

/// Result of running a lingo command
#[derive(Debug)]
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 is returned when error_count > 0.
    /// If false, always exit 0 (dry runs and non-strict translation).
    pub exit_on_errors: bool,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
