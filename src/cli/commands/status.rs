use anyhow::Result;

use super::{
    CommandKind, CommandResult, CommandSummary, LanguageStatus, StatusSummary,
    context::ProjectContext,
    helper::{block_on, finish},
};
use crate::cli::args::StatusCommand;
use crate::core::{TranslationSet, TranslationStore, missing_translations, split_default_and_others};

pub fn status(cmd: StatusCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let set = block_on(ctx.store.read_all())??;
    let summary = summarize(ctx.default_language(), set)?;

    let missing = summary.missing_count();
    Ok(finish(
        CommandKind::Status,
        CommandSummary::Status(summary),
        missing,
        true,
    ))
}

/// Count the missing keys of every non-default language.
pub fn summarize(default_language: &str, set: TranslationSet) -> Result<StatusSummary> {
    let partition = split_default_and_others(default_language, set)?;
    let default = &partition.default.translations;

    let languages = partition
        .others
        .iter()
        .map(|entry| LanguageStatus {
            language: entry.language.clone(),
            missing: missing_translations(default, &entry.translations).len(),
            total: default.len(),
        })
        .collect();

    Ok(StatusSummary {
        default_language: default_language.to_string(),
        total_keys: default.len(),
        languages,
    })
}
