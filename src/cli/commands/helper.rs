use std::future::Future;

use anyhow::{Context, Result};

use super::{CommandKind, CommandResult, CommandSummary};

/// Run a future to completion on a fresh current-thread runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

pub fn finish(
    kind: CommandKind,
    summary: CommandSummary,
    error_count: usize,
    exit_on_errors: bool,
) -> CommandResult {
    CommandResult {
        kind,
        summary,
        error_count,
        exit_on_errors,
    }
}
