use anyhow::Result;

use super::{
    CommandKind, CommandResult, CommandSummary, TranslateSummary,
    context::ProjectContext,
    extract::collect_keys,
    helper::{block_on, finish},
};
use crate::backend::OpenAiBackend;
use crate::cli::args::TranslateCommand;
use crate::config::BackendConfig;
use crate::core::add_missing_translations;

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let backend_config = backend_config(&ctx.config().backend, &cmd);
    let backend = OpenAiBackend::from_env(&backend_config)?;

    let (extract, pipeline) = block_on(async {
        let extract = if cmd.skip_extract {
            None
        } else {
            Some(collect_keys(&ctx, true).await?)
        };
        let pipeline =
            add_missing_translations(ctx.default_language(), ctx.dependencies(&backend)).await;
        Ok::<_, anyhow::Error>((extract, pipeline))
    })??;

    let error_count = usize::from(!pipeline.is_success());
    Ok(finish(
        CommandKind::Translate,
        CommandSummary::Translate(TranslateSummary { extract, pipeline }),
        error_count,
        cmd.strict,
    ))
}

fn backend_config(base: &BackendConfig, cmd: &TranslateCommand) -> BackendConfig {
    let mut config = base.clone();
    if let Some(base_url) = &cmd.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(model) = &cmd.model {
        config.model = model.clone();
    }
    config
}
