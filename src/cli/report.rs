//! Report formatting and printing utilities.
//!
//! Command output goes to stdout; diagnostics go through `tracing` on stderr.
//! Separate from command logic so every summary can be rendered into any writer.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, InitSummary, StatusSummary, TranslateSummary,
};
use crate::core::PipelineSummary;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of new keys listed in a dry run.
const MAX_KEYS_DISPLAY: usize = 20;

pub fn print(result: &CommandResult, verbose: bool) {
    let stdout = &mut io::stdout().lock();
    match &result.summary {
        CommandSummary::Init(summary) if !summary.created => {
            print_init_to(summary, &mut io::stderr().lock());
        }
        summary => print_summary_to(summary, verbose, stdout),
    }
}

/// Render one command summary into `writer`.
pub fn print_summary_to<W: Write>(summary: &CommandSummary, verbose: bool, writer: &mut W) {
    match summary {
        CommandSummary::Init(summary) => print_init_to(summary, writer),
        CommandSummary::Extract(summary) => print_extract_to(summary, verbose, writer),
        CommandSummary::Status(summary) => print_status_to(summary, writer),
        CommandSummary::Translate(summary) => print_translate_to(summary, verbose, writer),
    }
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    let name = summary
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| summary.path.display().to_string());

    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", name).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("{} already exists", name).red()
        );
    }
}

fn print_extract_to<W: Write>(summary: &ExtractSummary, verbose: bool, writer: &mut W) {
    let new_count = summary.new_keys.len();
    let file = summary.file.display();

    if new_count == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} source {}, found {} {} - {} is up to date",
                summary.files_scanned,
                plural(summary.files_scanned, "file", "files"),
                summary.keys_found,
                plural(summary.keys_found, "key", "keys"),
                file
            )
            .green()
        );
    } else if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} new key(s) to {}",
            "Added".green().bold(),
            new_count,
            file
        );
    } else {
        let shown = if verbose {
            new_count
        } else {
            new_count.min(MAX_KEYS_DISPLAY)
        };
        for key in summary.new_keys.iter().take(shown) {
            let _ = writeln!(writer, "  {} {:?}", "+".green(), key);
        }
        if shown < new_count {
            let _ = writeln!(writer, "  ... and {} more", new_count - shown);
        }
        let _ = writeln!(
            writer,
            "{} {} new key(s) to {}",
            "Would add".yellow().bold(),
            new_count,
            file
        );
        let _ = writeln!(writer, "Run with {} to write them.", "--apply".cyan());
    }

    print_unreadable_warning_to(summary.unreadable_files, verbose, writer);
}

fn print_unreadable_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn print_status_to<W: Write>(summary: &StatusSummary, writer: &mut W) {
    let width = summary
        .languages
        .iter()
        .map(|status| UnicodeWidthStr::width(status.language.as_str()))
        .chain(std::iter::once(UnicodeWidthStr::width(
            summary.default_language.as_str(),
        )))
        .max()
        .unwrap_or(0);

    let _ = writeln!(
        writer,
        "  {}{}  {} {} (default)",
        summary.default_language.bold(),
        padding(&summary.default_language, width),
        summary.total_keys,
        plural(summary.total_keys, "key", "keys")
    );

    for status in &summary.languages {
        let pad = padding(&status.language, width);
        if status.missing == 0 {
            let _ = writeln!(
                writer,
                "{} {}{}  {}",
                SUCCESS_MARK.green(),
                status.language,
                pad,
                "complete".green()
            );
        } else {
            let _ = writeln!(
                writer,
                "{} {}{}  {} of {} missing",
                FAILURE_MARK.red(),
                status.language,
                pad,
                status.missing.to_string().red().bold(),
                status.total
            );
        }
    }

    let missing = summary.missing_count();
    if missing == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "All translations are complete".green()
        );
    } else {
        let incomplete = summary.languages.iter().filter(|s| s.missing > 0).count();
        let _ = writeln!(
            writer,
            "{} missing translation(s) in {} language(s). Run {} to fill them.",
            missing.to_string().bold(),
            incomplete,
            "lingo translate".cyan()
        );
    }
}

fn print_translate_to<W: Write>(summary: &TranslateSummary, verbose: bool, writer: &mut W) {
    if let Some(extract) = &summary.extract
        && !extract.new_keys.is_empty()
    {
        print_extract_to(extract, verbose, writer);
    }

    match &summary.pipeline {
        PipelineSummary::Completed { translated } => {
            for (language, count) in translated.iter().filter(|(_, count)| **count > 0) {
                let _ = writeln!(writer, "  {}: {} key(s)", language, count);
            }
            let total = summary.pipeline.translated_count();
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Translated {} key(s) across {} language(s)",
                    total,
                    translated.len()
                )
                .green()
            );
        }
        PipelineSummary::Failed => {
            let _ = writeln!(
                writer,
                "{} {}",
                FAILURE_MARK.red(),
                "Translation failed, nothing was written (see log above)".red()
            );
        }
    }
}

fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(UnicodeWidthStr::width(text)))
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
