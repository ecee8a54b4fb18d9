#![forbid(unsafe_code)]

//! `match` and `debug`: evaluate a pattern against subject text.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use vreg_runtime::eval::{self, group_color};
use vreg_runtime::{DebugCursor, DebugMatch, HighlightSpan, SpanKind};

use crate::error::Result;
use crate::source::{Context, PatternSource, TextSource};

#[derive(Debug, Clone, Args)]
pub struct MatchArgs {
    #[command(flatten)]
    pub source: PatternSource,

    #[command(flatten)]
    pub text: TextSource,

    /// Print highlight spans instead of matches.
    #[arg(long)]
    pub spans: bool,
}

#[derive(Debug, Serialize)]
struct GroupView {
    group: usize,
    start: usize,
    length: usize,
    content: String,
    color: usize,
}

#[derive(Debug, Serialize)]
struct MatchView {
    index: usize,
    start: usize,
    length: usize,
    text: String,
    groups: Vec<GroupView>,
}

impl MatchView {
    fn new(index: usize, m: &DebugMatch, palette: usize) -> Self {
        let groups = m
            .groups
            .iter()
            .enumerate()
            .filter_map(|(i, g)| {
                let g = g.as_ref()?;
                Some(GroupView {
                    group: i + 1,
                    start: g.start,
                    length: g.length,
                    content: g.content.clone(),
                    color: group_color(i + 1, palette),
                })
            })
            .collect();
        Self {
            index,
            start: m.start,
            length: m.length,
            text: m.full_match.clone(),
            groups,
        }
    }

    fn write(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            out,
            "{:>3}  {}..{}  {:?}",
            self.index,
            self.start,
            self.start + self.length,
            self.text
        )?;
        for g in &self.groups {
            writeln!(
                out,
                "       group {} [{}..{}] {:?} (colour {})",
                g.group,
                g.start,
                g.start + g.length,
                g.content,
                g.color
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct MatchReport {
    pattern: String,
    count: usize,
    matches: Vec<MatchView>,
}

#[derive(Debug, Serialize)]
struct SpanView {
    match_index: usize,
    start: usize,
    length: usize,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<usize>,
}

impl From<&HighlightSpan> for SpanView {
    fn from(span: &HighlightSpan) -> Self {
        let (kind, group, color) = match span.kind {
            SpanKind::Match => ("match", None, None),
            SpanKind::Group { group, color } => ("group", Some(group), Some(color)),
        };
        Self {
            match_index: span.match_index,
            start: span.start,
            length: span.length,
            kind,
            group,
            color,
        }
    }
}

#[derive(Debug, Serialize)]
struct SpanReport {
    pattern: String,
    count: usize,
    spans: Vec<SpanView>,
}

/// `debug` output; the match fields are absent when nothing matched.
#[derive(Debug, Serialize)]
struct DebugReport {
    pattern: String,
    total: usize,
    #[serde(flatten)]
    current: Option<MatchView>,
}

pub fn run_match(ctx: &Context, args: MatchArgs, out: &mut dyn Write) -> Result<()> {
    let pattern = args.source.resolve(ctx)?;
    let text = args.text.read()?;
    let set = eval::evaluate(&pattern, &text)?;
    let palette = ctx.config.palette_size;

    if args.spans {
        let spans = set.highlight_spans(palette);
        if ctx.json {
            return ctx.write_json(
                out,
                &SpanReport {
                    pattern,
                    count: set.len(),
                    spans: spans.iter().map(SpanView::from).collect(),
                },
            );
        }
        for span in &spans {
            match span.kind {
                SpanKind::Match => writeln!(
                    out,
                    "match {} {}+{}",
                    span.match_index, span.start, span.length
                )?,
                SpanKind::Group { group, color } => writeln!(
                    out,
                    "group {}.{} {}+{} colour {}",
                    span.match_index, group, span.start, span.length, color
                )?,
            }
        }
        return Ok(());
    }

    let views: Vec<MatchView> = set
        .matches()
        .iter()
        .enumerate()
        .map(|(i, m)| MatchView::new(i, m, palette))
        .collect();
    if ctx.json {
        return ctx.write_json(
            out,
            &MatchReport {
                pattern,
                count: views.len(),
                matches: views,
            },
        );
    }
    for view in &views {
        view.write(out)?;
    }
    writeln!(out, "{} match(es)", views.len())?;
    Ok(())
}

#[derive(Debug, Clone, Args)]
pub struct DebugArgs {
    #[command(flatten)]
    pub source: PatternSource,

    #[command(flatten)]
    pub text: TextSource,

    /// Match to inspect; clamped to the last match.
    #[arg(long, default_value_t = 0)]
    pub index: usize,
}

pub fn run_debug(ctx: &Context, args: DebugArgs, out: &mut dyn Write) -> Result<()> {
    let pattern = args.source.resolve(ctx)?;
    let text = args.text.read()?;
    let mut cursor = DebugCursor::new(eval::evaluate(&pattern, &text)?);
    let total = cursor.set().len();
    let palette = ctx.config.palette_size;

    cursor.select(args.index);
    let view = cursor
        .current()
        .map(|current| MatchView::new(cursor.index(), current, palette));
    if ctx.json {
        return ctx.write_json(
            out,
            &DebugReport {
                pattern,
                total,
                current: view,
            },
        );
    }
    let Some(view) = view else {
        writeln!(out, "no matches for {pattern:?}")?;
        return Ok(());
    };
    writeln!(out, "match {} of {}", view.index + 1, total)?;
    view.write(out)?;
    Ok(())
}
