#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::compose::{BuildArgs, TemplateArgs, run_build, run_template};
use crate::error::Result;
use crate::inspect::{ExportArgs, GenerateArgs, run_export, run_generate, run_tokens};
use crate::logging;
use crate::playground::{DebugArgs, MatchArgs, run_debug, run_match};
use crate::scan::{ScanArgs, run_scan};
use crate::source::Context;

#[derive(Debug, Parser)]
#[command(
    name = "vreg",
    about = "Build, evaluate, and export regular expressions assembled from token graphs",
    version
)]
pub struct Cli {
    /// Session configuration file (TOML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless VREG_LOG says otherwise.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit JSON instead of text where supported.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the token table.
    Tokens,

    /// Linearize a project file into its pattern.
    Generate(GenerateArgs),

    /// List the matches of a pattern in some text.
    Match(MatchArgs),

    /// Step to one match and show its capture groups.
    Debug(DebugArgs),

    /// Count matches in a file or in the files of a directory.
    Scan(ScanArgs),

    /// Render the pattern as a source-code snippet.
    Export(ExportArgs),

    /// Expand a canned pattern into a project.
    Template(TemplateArgs),

    /// Compose a project from token names.
    Build(BuildArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

pub fn run(cli: Cli) -> Result<()> {
    run_with_output(cli, &mut std::io::stdout())
}

pub fn run_with_output(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let ctx = Context::load(cli.config.as_deref(), cli.json)?;
    match cli.command {
        Commands::Tokens => run_tokens(&ctx, out),
        Commands::Generate(args) => run_generate(&ctx, args, out),
        Commands::Match(args) => run_match(&ctx, args, out),
        Commands::Debug(args) => run_debug(&ctx, args, out),
        Commands::Scan(args) => run_scan(&ctx, args, out),
        Commands::Export(args) => run_export(&ctx, args, out),
        Commands::Template(args) => run_template(&ctx, args, out),
        Commands::Build(args) => run_build(&ctx, args, out),
    }
}
