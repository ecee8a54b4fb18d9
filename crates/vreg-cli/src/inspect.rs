#![forbid(unsafe_code)]

//! `tokens`, `generate` and `export`.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use vreg_core::{ExportTarget, TOKENS, export};

use crate::error::{Result, VregError};
use crate::source::{Context, PatternSource};

#[derive(Debug, Serialize)]
struct TokenRow {
    name: &'static str,
    label: &'static str,
    fragment: &'static str,
    category: &'static str,
    ordinal: u8,
}

pub fn run_tokens(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let rows: Vec<TokenRow> = TOKENS
        .iter()
        .map(|t| TokenRow {
            name: t.name,
            label: t.label,
            fragment: t.fragment,
            category: t.category.name(),
            ordinal: t.kind.ordinal(),
        })
        .collect();
    if ctx.json {
        return ctx.write_json(out, &rows);
    }
    for row in &rows {
        writeln!(
            out,
            "{:<16} {:<12} {:<11} {}",
            row.name, row.fragment, row.category, row.label
        )?;
    }
    Ok(())
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Project file to linearize.
    pub project: PathBuf,

    /// Also list the visited nodes.
    #[arg(long)]
    pub chain: bool,
}

#[derive(Debug, Serialize)]
struct ChainNode {
    id: u32,
    kind: &'static str,
    fragment: String,
}

#[derive(Debug, Serialize)]
struct GenerateReport {
    pattern: String,
    truncated: bool,
    chain: Vec<ChainNode>,
}

pub fn run_generate(ctx: &Context, args: GenerateArgs, out: &mut dyn Write) -> Result<()> {
    let session = ctx.open_project(&args.project)?;
    let chain = session.chain();
    let graph = session.graph();
    let nodes: Vec<ChainNode> = chain
        .nodes
        .iter()
        .filter_map(|id| graph.node(*id))
        .map(|n| ChainNode {
            id: n.id.0,
            kind: n.kind.name(),
            fragment: n.fragment.clone(),
        })
        .collect();

    if ctx.json {
        return ctx.write_json(
            out,
            &GenerateReport {
                pattern: chain.pattern,
                truncated: chain.truncated,
                chain: nodes,
            },
        );
    }
    writeln!(out, "{}", chain.pattern)?;
    if args.chain {
        for node in &nodes {
            writeln!(out, "  #{:<5} {:<16} {}", node.id, node.kind, node.fragment)?;
        }
        if chain.truncated {
            writeln!(out, "  (truncated at {} hops)", session.config().traversal_limit)?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: PatternSource,

    /// raw, rust, python, javascript, cpp, or all.
    #[arg(long, default_value = "raw")]
    pub target: String,
}

#[derive(Debug, Serialize)]
struct Snippet {
    target: &'static str,
    code: String,
}

pub fn run_export(ctx: &Context, args: ExportArgs, out: &mut dyn Write) -> Result<()> {
    let targets: Vec<ExportTarget> = if args.target == "all" {
        ExportTarget::ALL.to_vec()
    } else {
        let target = ExportTarget::from_name(&args.target).ok_or_else(|| {
            VregError::invalid(format!("unknown export target: {}", args.target))
        })?;
        vec![target]
    };
    let pattern = args.source.resolve(ctx)?;
    let snippets: Vec<Snippet> = targets
        .into_iter()
        .map(|t| Snippet {
            target: t.name(),
            code: export(&pattern, t),
        })
        .collect();

    if ctx.json {
        return ctx.write_json(out, &snippets);
    }
    if let [only] = snippets.as_slice() {
        writeln!(out, "{}", only.code)?;
        return Ok(());
    }
    for snippet in &snippets {
        writeln!(out, "// {}\n{}", snippet.target, snippet.code)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn tokens_lists_every_kind() {
        let mut buf = Vec::new();
        run_tokens(&Context::default(), &mut buf).unwrap();
        let out = text(buf);
        assert_eq!(out.lines().count(), TOKENS.len());
        assert!(out.lines().next().unwrap().starts_with("start"));
    }

    #[test]
    fn tokens_json_is_an_array() {
        let ctx = Context {
            json: true,
            ..Context::default()
        };
        let mut buf = Vec::new();
        run_tokens(&ctx, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(TOKENS.len()));
        assert_eq!(value[3]["fragment"], r"\d");
    }

    #[test]
    fn export_rejects_unknown_target() {
        let args = ExportArgs {
            source: PatternSource {
                project: None,
                pattern: Some("a".into()),
            },
            target: "cobol".into(),
        };
        let err = run_export(&Context::default(), args, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, VregError::InvalidArgument { .. }));
    }

    #[test]
    fn export_single_target() {
        let args = ExportArgs {
            source: PatternSource {
                project: None,
                pattern: Some(r"\d+".into()),
            },
            target: "python".into(),
        };
        let mut buf = Vec::new();
        run_export(&Context::default(), args, &mut buf).unwrap();
        assert_eq!(text(buf), "pattern = re.compile(r\"\\d+\")\n");
    }

    #[test]
    fn generate_missing_project() {
        let args = GenerateArgs {
            project: "/no/such/file.vreg".into(),
            chain: false,
        };
        let err = run_generate(&Context::default(), args, &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
