//! Error types.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors produced while resolving a type or emitting its test skeleton.
#[derive(Error, Debug)]
pub enum SkelError {
    /// The source file that should define the type does not exist.
    #[error("Could not open {}.", .0.display())]
    SourceFileNotFound(PathBuf),

    /// The source file was loaded but does not define the requested type.
    #[error("Could not find class \"{class}\" in {}.", .file.display())]
    ClassNotFound {
        /// Name of the type that was requested.
        class: String,
        /// Source file that was searched.
        file: PathBuf,
    },

    /// The source file is not valid Rust.
    #[error("Failed to parse source: {0}")]
    Parse(String),

    /// Reading a file failed.
    #[error("Failed to read file: {0}")]
    Io(#[from] io::Error),

    /// A template override named a file that could not be read.
    #[error("Failed to load template from {}: {source}", .path.display())]
    TemplateLoadFailed {
        /// Template file that was named.
        path: PathBuf,
        /// Underlying read error.
        source: io::Error,
    },

    /// The generated skeleton could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        /// Output path that was requested.
        path: PathBuf,
        /// Underlying write error.
        source: io::Error,
    },

    /// Syntax highlighting failed.
    #[error("Highlighting error: {0}")]
    Highlight(String),

    /// Serializing a descriptor failed.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<syn::Error> for SkelError {
    fn from(err: syn::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<syntect::Error> for SkelError {
    fn from(err: syntect::Error) -> Self {
        Self::Highlight(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SkelError>;
