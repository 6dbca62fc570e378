//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `init`: Write a default `.lingorc.json`
//! - `extract`: Collect `t('...')` keys into the default language file
//! - `status`: Show how many keys each language is missing
//! - `translate`: Fill missing keys through the model backend

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Status(cmd)) => cmd.common.verbose,
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all project commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Default (source) language (overrides config file)
    #[arg(long)]
    pub default_language: Option<String>,

    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Messages directory path (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            default_language: self.default_language.clone(),
            messages_root: self.messages_root.clone(),
            source_root: self.source_root.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write new keys (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Exit with status 1 when the translation run fails
    #[arg(long)]
    pub strict: bool,

    /// Translate what is already in the default language file without scanning sources
    #[arg(long)]
    pub skip_extract: bool,

    /// Chat-completions base URL (overrides config file)
    #[arg(long, env = "LINGO_BASE_URL")]
    pub base_url: Option<String>,

    /// Model name (overrides config file)
    #[arg(long, env = "LINGO_MODEL")]
    pub model: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a new .lingorc.json configuration file
    Init,
    /// Scan sources for t() keys and add them to the default language file
    Extract(ExtractCommand),
    /// Show missing translation counts per language
    Status(StatusCommand),
    /// Fill missing translations with the configured model
    Translate(TranslateCommand),
}
