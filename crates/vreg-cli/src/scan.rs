#![forbid(unsafe_code)]

//! `scan`: count matches across a file or the files of a directory.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use vreg_runtime::{ScanReport, Scanner, SkipReason};

use crate::error::Result;
use crate::source::{Context, PatternSource};

#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub source: PatternSource,

    /// File or directory to scan. Directories are not descended into.
    pub path: PathBuf,

    /// Also list files without matches.
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Serialize)]
struct FileRow {
    path: String,
    matches: usize,
}

#[derive(Debug, Serialize)]
struct SkipRow {
    path: String,
    reason: String,
}

#[derive(Debug, Serialize)]
struct ScanSummary {
    pattern: String,
    files_scanned: usize,
    files_skipped: usize,
    total_matches: usize,
    files: Vec<FileRow>,
    skipped: Vec<SkipRow>,
}

fn describe(reason: &SkipReason) -> String {
    match reason {
        SkipReason::Unreadable(message) => format!("unreadable: {message}"),
        SkipReason::TooLarge { bytes } => format!("too large ({bytes} bytes)"),
    }
}

fn summarize(pattern: String, report: &ScanReport, all: bool) -> ScanSummary {
    ScanSummary {
        pattern,
        files_scanned: report.files_scanned(),
        files_skipped: report.files_skipped(),
        total_matches: report.total_matches,
        files: report
            .files
            .iter()
            .filter(|f| all || f.matches > 0)
            .map(|f| FileRow {
                path: f.path.display().to_string(),
                matches: f.matches,
            })
            .collect(),
        skipped: report
            .skipped
            .iter()
            .map(|s| SkipRow {
                path: s.path.display().to_string(),
                reason: describe(&s.reason),
            })
            .collect(),
    }
}

pub fn run_scan(ctx: &Context, args: ScanArgs, out: &mut dyn Write) -> Result<()> {
    let pattern = args.source.resolve(ctx)?;
    let report = Scanner::new(&pattern)?
        .with_max_bytes(ctx.config.max_scan_bytes)
        .scan_path(&args.path)?;
    let summary = summarize(pattern, &report, args.all);

    if ctx.json {
        return ctx.write_json(out, &summary);
    }
    for file in &summary.files {
        writeln!(out, "{}: {}", file.path, file.matches)?;
    }
    for skip in &summary.skipped {
        writeln!(out, "skipped {} ({})", skip.path, skip.reason)?;
    }
    writeln!(
        out,
        "scanned {} file(s), skipped {}, {} match(es)",
        summary.files_scanned, summary.files_skipped, summary.total_matches
    )?;
    Ok(())
}
