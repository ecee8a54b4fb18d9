#![forbid(unsafe_code)]

//! Shared command inputs: where the pattern and the subject text come from.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use vreg_runtime::{EditorSession, SessionConfig};

use crate::error::{Result, VregError};

/// Settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub config: SessionConfig,
    /// Emit one JSON document instead of text.
    pub json: bool,
}

impl Context {
    /// Load `--config` if given, defaults otherwise.
    pub fn load(config: Option<&Path>, json: bool) -> Result<Self> {
        let config = match config {
            Some(path) => SessionConfig::from_toml_file(path)?,
            None => SessionConfig::default(),
        };
        Ok(Self { config, json })
    }

    /// Open a session on the project at `path`.
    pub fn open_project(&self, path: &Path) -> Result<EditorSession> {
        let mut session = EditorSession::with_config(self.config.clone());
        session.load_file(path)?;
        Ok(session)
    }

    pub fn write_json<T: Serialize>(&self, out: &mut dyn Write, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct PatternSource {
    /// Project file whose chain supplies the pattern.
    #[arg(long, conflicts_with = "pattern", required_unless_present = "pattern")]
    pub project: Option<PathBuf>,

    /// Pattern given directly.
    #[arg(long)]
    pub pattern: Option<String>,
}

impl PatternSource {
    pub fn resolve(&self, ctx: &Context) -> Result<String> {
        match (&self.project, &self.pattern) {
            (Some(path), None) => Ok(ctx.open_project(path)?.pattern()),
            (None, Some(pattern)) => Ok(pattern.clone()),
            _ => Err(VregError::invalid(
                "exactly one of --project or --pattern is required",
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct TextSource {
    /// Subject text.
    #[arg(long, conflicts_with = "text_file", required_unless_present = "text_file")]
    pub text: Option<String>,

    /// Read the subject text from a file.
    #[arg(long = "text-file")]
    pub text_file: Option<PathBuf>,
}

impl TextSource {
    pub fn read(&self) -> Result<String> {
        match (&self.text, &self.text_file) {
            (Some(text), None) => Ok(text.clone()),
            (None, Some(path)) => {
                if !path.exists() {
                    return Err(VregError::invalid(format!(
                        "text file not found: {}",
                        path.display()
                    )));
                }
                Ok(std::fs::read_to_string(path)?)
            }
            _ => Err(VregError::invalid(
                "exactly one of --text or --text-file is required",
            )),
        }
    }
}
