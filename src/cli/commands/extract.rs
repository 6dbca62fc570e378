use anyhow::Result;
use tracing::{debug, info};

use super::{
    CommandKind, CommandResult, CommandSummary, ExtractSummary,
    context::ProjectContext,
    helper::{block_on, finish},
};
use crate::cli::args::ExtractCommand;
use crate::core::identity_map;

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let summary = block_on(collect_keys(&ctx, cmd.apply))??;

    // A dry run reports pending keys without failing.
    let pending = if summary.is_apply {
        0
    } else {
        summary.new_keys.len()
    };
    Ok(finish(
        CommandKind::Extract,
        CommandSummary::Extract(summary),
        pending,
        false,
    ))
}

/// Scan sources and find keys missing from the default language file.
///
/// With `apply`, those keys are merged into the file as identity
/// translations. Existing entries are never touched.
pub async fn collect_keys(ctx: &ProjectContext, apply: bool) -> Result<ExtractSummary> {
    let default_language = ctx.default_language();
    let report = ctx.scan()?;
    for warning in &report.warnings {
        debug!(path = %warning.path.display(), error = %warning.message, "skipped unreadable file");
    }

    let existing = ctx.store.read_language(default_language).await?;
    let new_keys: Vec<String> = report
        .keys
        .iter()
        .filter(|key| !existing.contains_key(*key))
        .cloned()
        .collect();

    if apply && !new_keys.is_empty() {
        let stats = ctx
            .store
            .merge_language(default_language, identity_map(&new_keys))
            .await?;
        info!(
            language = default_language,
            added = stats.added,
            "added extracted keys"
        );
    }

    Ok(ExtractSummary {
        default_language: default_language.to_string(),
        file: ctx.store.file_path(default_language),
        files_scanned: report.files_scanned,
        keys_found: report.keys.len(),
        new_keys,
        unreadable_files: report.warnings.len(),
        is_apply: apply,
    })
}
