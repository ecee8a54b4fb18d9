#![forbid(unsafe_code)]

//! File and directory scanning.
//!
//! Applies one compiled pattern to file contents and reports per-file match
//! counts. A directory scan covers the regular files directly inside the
//! directory (no recursion), in file-name order. Contents are decoded
//! lossily, so invalid UTF-8 sequences match as U+FFFD and never hide a
//! file. Files that cannot be read or exceed the size limit are skipped and
//! counted; they never abort the batch. Only a pattern that fails to compile, or a target
//! path that does not exist, fails the whole scan.
//!
//! Scans run to completion on the calling thread. A caller that moves them
//! off-thread must hand over an owned copy of the pattern string (and of the
//! graph, if it needs one), since editing may continue meanwhile.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::DEFAULT_MAX_SCAN_BYTES;
use crate::eval::{EvalError, Result, compile, count_matches};

/// Matches found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub matches: usize,
}

/// Why a file was left out of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unreadable(String),
    TooLarge { bytes: u64 },
}

/// A file left out of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Aggregate result of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanReport {
    /// Scanned files in scan order, including those with zero matches.
    pub files: Vec<FileReport>,
    pub skipped: Vec<SkippedFile>,
    pub total_matches: usize,
}

impl ScanReport {
    #[must_use]
    pub fn files_scanned(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }

    /// Files with at least one match.
    pub fn hits(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.matches > 0)
    }

    fn record(&mut self, outcome: std::result::Result<FileReport, SkippedFile>) {
        match outcome {
            Ok(report) => {
                self.total_matches += report.matches;
                self.files.push(report);
            }
            Err(skipped) => {
                tracing::debug!(path = %skipped.path.display(), reason = ?skipped.reason, "file skipped");
                self.skipped.push(skipped);
            }
        }
    }
}

/// Scanner holding a compiled pattern and the size limit.
#[derive(Debug, Clone)]
pub struct Scanner {
    regex: Regex,
    max_bytes: u64,
}

impl Scanner {
    /// Compile `pattern` for scanning.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: compile(pattern)?,
            max_bytes: DEFAULT_MAX_SCAN_BYTES,
        })
    }

    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Scan a single file. Unlike a directory scan, an unreadable file is an
    /// error here.
    pub fn scan_file(&self, path: &Path) -> Result<ScanReport> {
        if !path.exists() {
            return Err(EvalError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read(path).map_err(|source| EvalError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let mut report = ScanReport::default();
        report.record(Ok(self.count_bytes(path, &text)));
        Ok(report)
    }

    /// Scan the regular files directly inside `dir`.
    pub fn scan_directory(&self, dir: &Path) -> Result<ScanReport> {
        if !dir.is_dir() {
            return Err(EvalError::PathNotFound {
                path: dir.to_path_buf(),
            });
        }
        let entries = fs::read_dir(dir).map_err(|source| EvalError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .map(|entry| entry.path())
            .collect();
        files.sort();

        let mut report = ScanReport::default();
        for path in files {
            report.record(self.scan_entry(&path));
        }
        tracing::info!(
            dir = %dir.display(),
            scanned = report.files_scanned(),
            skipped = report.files_skipped(),
            total = report.total_matches,
            "directory scan finished"
        );
        Ok(report)
    }

    /// Scan a file or a directory, whichever `path` is.
    pub fn scan_path(&self, path: &Path) -> Result<ScanReport> {
        if path.is_dir() {
            self.scan_directory(path)
        } else {
            self.scan_file(path)
        }
    }

    fn scan_entry(&self, path: &Path) -> std::result::Result<FileReport, SkippedFile> {
        let skipped = |reason| SkippedFile {
            path: path.to_path_buf(),
            reason,
        };
        let len = fs::metadata(path)
            .map_err(|e| skipped(SkipReason::Unreadable(e.to_string())))?
            .len();
        if len > self.max_bytes {
            return Err(skipped(SkipReason::TooLarge { bytes: len }));
        }
        let bytes = fs::read(path).map_err(|e| skipped(SkipReason::Unreadable(e.to_string())))?;
        Ok(self.count_bytes(path, &bytes))
    }

    fn count_bytes(&self, path: &Path, bytes: &[u8]) -> FileReport {
        let text = String::from_utf8_lossy(bytes);
        FileReport {
            path: path.to_path_buf(),
            matches: count_matches(&self.regex, &text),
        }
    }
}

/// Compile `pattern` and scan one file.
pub fn evaluate_file(pattern: &str, path: &Path) -> Result<ScanReport> {
    Scanner::new(pattern)?.scan_file(path)
}

/// Compile `pattern` and scan the regular files directly inside `dir`.
pub fn evaluate_directory(pattern: &str, dir: &Path) -> Result<ScanReport> {
    Scanner::new(pattern)?.scan_directory(dir)
}
