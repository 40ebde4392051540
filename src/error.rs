//! Error types for the ka package manager
//!
//! Defines the error taxonomy shared by the manifest store, the dependency
//! fetcher and the toolchain delegation layer.

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable that overrides where the Orus toolchain lives
pub const TOOLCHAIN_HOME_VAR: &str = "ORUS_HOME";

/// Top-level error type for all ka errors
#[derive(Debug, Error)]
pub enum KaError {
    #[error("{0}")]
    Package(#[from] PackageError),

    #[error("{0}")]
    Toolchain(#[from] ToolchainError),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Manifest, project and dependency errors
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    #[error("failed to serialize manifest: {0}")]
    Serialize(String),

    #[error("failed to fetch dependency {name}: {cause}")]
    Fetch { name: String, cause: String },

    #[error("invalid format '{0}', want name=version")]
    InvalidDependencyArg(String),

    #[error("project creation failed: {0}")]
    ProjectCreationFailed(String),
}

/// Errors raised while locating or invoking the external toolchain
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("{executable} executable not found. Please ensure Orus is installed and in your PATH, or set the {override_var} environment variable")]
    NotFound {
        executable: String,
        override_var: String,
    },

    #[error("file {} not found", .0.display())]
    SourceNotFound(PathBuf),

    #[error("failed to launch {}: {message}", .program.display())]
    Launch { program: PathBuf, message: String },
}

/// Result type alias for ka operations
pub type KaResult<T> = Result<T, KaError>;

impl KaError {
    /// Shorthand for I/O failures outside the manifest store
    pub fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        Self::Io(format!("{}: {}", context, err))
    }
}
