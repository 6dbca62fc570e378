use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, extract::extract, init::init, status::status, translate::translate,
    },
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Init) => init(),
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Status(cmd)) => status(cmd),
        Some(Command::Translate(cmd)) => translate(cmd),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
