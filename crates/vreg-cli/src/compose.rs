#![forbid(unsafe_code)]

//! `template` and `build`: create project files without the canvas.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use vreg_core::{Point, TemplateKind, TokenKind};
use vreg_runtime::EditorSession;

use crate::error::{Result, VregError};
use crate::source::Context;

#[derive(Debug, Clone, Args)]
pub struct TemplateArgs {
    /// email, iso-date, us-phone, url, or ipv4.
    #[arg(required_unless_present = "list")]
    pub name: Option<String>,

    /// Write the expanded graph to this project file.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// List the available templates.
    #[arg(long)]
    pub list: bool,
}

pub fn run_template(ctx: &Context, args: TemplateArgs, out: &mut dyn Write) -> Result<()> {
    if args.list {
        for template in TemplateKind::ALL {
            writeln!(out, "{:<10} {}", template.name(), template.pattern())?;
        }
        return Ok(());
    }
    let name = args.name.as_deref().unwrap_or_default();
    let template = TemplateKind::from_name(name)
        .ok_or_else(|| VregError::invalid(format!("unknown template: {name}")))?;

    let mut session = EditorSession::with_config(ctx.config.clone());
    session.expand_template(template, Point::new(100.0, 200.0))?;
    finish(&session, args.output, out)
}

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Token names in chain order; `custom=TEXT` sets a literal.
    #[arg(required = true, num_args = 1..)]
    pub tokens: Vec<String>,

    /// Write the chain to this project file.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Parse one `build` item into a kind and an optional custom literal.
fn parse_item(item: &str) -> Result<(TokenKind, Option<&str>)> {
    let (name, text) = match item.split_once('=') {
        Some((name, text)) => (name, Some(text)),
        None => (item, None),
    };
    let kind = TokenKind::from_name(name)
        .ok_or_else(|| VregError::invalid(format!("unknown token: {name}")))?;
    if text.is_some() && !kind.is_editable() {
        return Err(VregError::invalid(format!(
            "only custom tokens take text, got {item}"
        )));
    }
    Ok((kind, text))
}

pub fn run_build(ctx: &Context, args: BuildArgs, out: &mut dyn Write) -> Result<()> {
    let items = args
        .tokens
        .iter()
        .map(|t| parse_item(t))
        .collect::<Result<Vec<_>>>()?;

    let mut session = EditorSession::with_config(ctx.config.clone());
    let step = ctx.config.template_step;
    let mut previous = None;
    for (i, (kind, text)) in items.into_iter().enumerate() {
        let id = session.add_node(kind, Point::new(100.0 + step * i as f32, 200.0))?;
        if let Some(text) = text {
            session.edit_custom_text(id, text);
        }
        if let Some(prev) = previous {
            session.connect(prev, id);
        }
        previous = Some(id);
    }
    finish(&session, args.output, out)
}

fn finish(session: &EditorSession, output: Option<PathBuf>, out: &mut dyn Write) -> Result<()> {
    if let Some(path) = output {
        session.save_file(&path)?;
        info!(path = %path.display(), "project written");
    }
    writeln!(out, "{}", session.pattern())?;
    Ok(())
}
