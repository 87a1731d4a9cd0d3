//! # scenedig-error - Unified Error Handling
//!
//! Error types shared by the scenedig crates.
//!
//! Scene and metadata parsing never fail: missing or malformed data degrades
//! to sentinels. The errors here come from the collaborators around the
//! parser (reading files, locating the project, writing reports), and carry
//! enough context to tell the user which file was involved.

use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The main unified error type for the scenedig toolkit
#[derive(Error, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScenedigError {
    /// File system and I/O related errors
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        file_path: Option<PathBuf>,
    },

    /// Project layout errors
    #[error("Project error: {message}")]
    Project {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        project_path: Option<PathBuf>,
        kind: ProjectErrorKind,
    },

    /// CLI and user interface errors
    #[error("CLI error: {message}")]
    Cli {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        command: Option<String>,
        kind: CliErrorKind,
    },
}

/// Specific kinds of project errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProjectErrorKind {
    #[error("Invalid project root")]
    InvalidRoot,
}

/// Specific kinds of CLI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CliErrorKind {
    #[error("Command execution failed")]
    ExecutionFailed,
    #[error("Output formatting failed")]
    OutputFormatError,
}

/// Convenient result type for scenedig operations
pub type Result<T> = std::result::Result<T, ScenedigError>;

impl ScenedigError {
    /// Create a new I/O error with file path context
    pub fn io_with_path<M: Into<String>, P: Into<PathBuf>>(message: M, path: P) -> Self {
        Self::Io {
            message: message.into(),
            file_path: Some(path.into()),
        }
    }

    /// Create a new project error
    pub fn project<M: Into<String>>(message: M, kind: ProjectErrorKind) -> Self {
        Self::Project {
            message: message.into(),
            project_path: None,
            kind,
        }
    }

    /// Create a new CLI error
    pub fn cli<M: Into<String>>(message: M, kind: CliErrorKind) -> Self {
        Self::Cli {
            message: message.into(),
            command: None,
            kind,
        }
    }

    /// Add file path context to an existing error
    pub fn with_file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let path = path.into();
        match &mut self {
            Self::Io { file_path, .. } => *file_path = Some(path),
            Self::Project { project_path, .. } => *project_path = Some(path),
            Self::Cli { .. } => {}
        }
        self
    }

    /// Add command context to CLI errors
    pub fn with_command<C: Into<String>>(mut self, name: C) -> Self {
        if let Self::Cli { command, .. } = &mut self {
            *command = Some(name.into());
        }
        self
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_project(&self) -> bool {
        matches!(self, Self::Project { .. })
    }

    /// Get the file path associated with this error, if any
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { file_path, .. } => file_path.as_ref(),
            Self::Project { project_path, .. } => project_path.as_ref(),
            Self::Cli { .. } => None,
        }
    }

    /// Get a user-friendly error message suitable for CLI display
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                message, file_path, ..
            } => {
                if let Some(path) = file_path {
                    format!("File error in '{}': {}", path.display(), message)
                } else {
                    message.clone()
                }
            }
            Self::Project {
                message,
                project_path,
                ..
            } => {
                if let Some(path) = project_path {
                    format!("Project error in '{}': {}", path.display(), message)
                } else {
                    format!("Project error: {message}")
                }
            }
            Self::Cli {
                message, command, ..
            } => {
                if let Some(cmd) = command {
                    format!("Command '{cmd}' failed: {message}")
                } else {
                    format!("CLI error: {message}")
                }
            }
        }
    }

    /// Get a short error summary without context details
    pub fn summary(&self) -> String {
        match self {
            Self::Io { message, .. } => format!("I/O: {message}"),
            Self::Project { kind, .. } => format!("Project: {kind}"),
            Self::Cli { kind, .. } => format!("CLI: {kind}"),
        }
    }
}

/// Domain helpers so call sites read the same across crates.
impl ScenedigError {
    pub fn project_invalid_root<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        Self::project(
            format!("project path does not exist: {}", path.display()),
            ProjectErrorKind::InvalidRoot,
        )
        .with_file_path(path)
    }

    pub fn cli_execution_failed<M: Into<String>>(message: M) -> Self {
        Self::cli(message, CliErrorKind::ExecutionFailed)
    }

    pub fn cli_output_format<M: Into<String>>(message: M) -> Self {
        Self::cli(message, CliErrorKind::OutputFormatError)
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for ScenedigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            file_path: None,
        }
    }
}
