use std::{env, fs};

use anyhow::{Context, Result};

use super::{CommandKind, CommandResult, CommandSummary, InitSummary, helper::finish};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<CommandResult> {
    let config_path = env::current_dir()
        .context("Failed to get current directory")?
        .join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(finish(
            CommandKind::Init,
            CommandSummary::Init(InitSummary {
                path: config_path,
                created: false,
            }),
            1,
            true,
        ));
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(finish(
        CommandKind::Init,
        CommandSummary::Init(InitSummary {
            path: config_path,
            created: true,
        }),
        0,
        true,
    ))
}
