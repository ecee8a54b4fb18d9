#![forbid(unsafe_code)]

use thiserror::Error;

use vreg_core::{GraphError, ProjectError};
use vreg_runtime::{ConfigError, EvalError};

#[derive(Debug, Error)]
pub enum VregError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VregError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            Self::Project(ProjectError::FileNotFound { .. })
            | Self::Eval(EvalError::PathNotFound { .. }) => 3,
            Self::Project(ProjectError::InvalidFormat { .. }) => 4,
            Self::Eval(EvalError::EmptyPattern | EvalError::InvalidPattern { .. }) => 5,
            Self::Config(_) => 6,
            Self::Project(ProjectError::Io(_))
            | Self::Eval(EvalError::Unreadable { .. })
            | Self::Graph(_)
            | Self::Io(_)
            | Self::Json(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, VregError>;
