//! Codebase scanning: find source files and pull literal keys out of them.

pub mod extract;
pub mod files;

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::{debug, warn};

pub use extract::{KeyExtractor, extract_keys};
pub use files::{SCANNABLE_EXTENSIONS, ScanResult, scan_files};

/// Options for one codebase scan.
#[derive(Debug, Clone)]
pub struct ScanOptions<'a> {
    pub source_root: &'a Path,
    pub includes: &'a [String],
    pub ignores: &'a [String],
    pub ignore_test_files: bool,
    pub function_names: &'a [String],
}

/// A file that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub message: String,
}

/// Keys found across the codebase.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub keys: BTreeSet<String>,
    pub files_scanned: usize,
    pub warnings: Vec<ScanWarning>,
}

/// Scan every source file and collect the distinct literal keys.
///
/// Files are read and scanned in parallel. Unreadable files become warnings
/// and do not stop the scan.
pub fn scan_codebase(options: &ScanOptions<'_>) -> Result<ScanReport, regex::Error> {
    let extractor = KeyExtractor::new(options.function_names)?;
    let scan = scan_files(
        options.source_root,
        options.includes,
        options.ignores,
        options.ignore_test_files,
    );

    let per_file: Vec<Result<Vec<String>, ScanWarning>> = scan
        .files
        .par_iter()
        .map(|path| {
            fs::read_to_string(path)
                .map(|content| extractor.extract(&content))
                .map_err(|e| ScanWarning {
                    path: path.clone(),
                    message: e.to_string(),
                })
        })
        .collect();

    let mut report = ScanReport {
        files_scanned: scan.files.len(),
        ..ScanReport::default()
    };
    for result in per_file {
        match result {
            Ok(keys) => report.keys.extend(keys),
            Err(warning) => {
                warn!(path = %warning.path.display(), error = %warning.message, "cannot read file");
                report.warnings.push(warning);
            }
        }
    }

    debug!(
        files = report.files_scanned,
        keys = report.keys.len(),
        skipped = scan.skipped_count,
        "scanned codebase"
    );
    Ok(report)
}
