//! Error handling for copydir.
//! Defines the error type and result alias used throughout the crate.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which part of a source file was being rendered when a template failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateTarget {
    FileName,
    Content,
}

impl fmt::Display for TemplateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateTarget::FileName => write!(f, "file name"),
            TemplateTarget::Content => write!(f, "content"),
        }
    }
}

/// Custom error types for copydir operations.
///
/// Every failure aborts the copy in progress; the variant identifies the
/// failing step and the path involved.
#[derive(Error, Debug)]
pub enum Error {
    /// Source or destination is missing a directory where one is required
    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// A filesystem operation failed on a known path
    #[error("{step} '{}': {source}", path.display())]
    Io {
        step: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Exclusive creation found a file already in place
    #[error("creating dst file '{}': file already exists", path.display())]
    FileExists { path: PathBuf },

    #[error("Template syntax error: {0}")]
    TemplateSyntaxError(#[source] minijinja::Error),

    #[error("Template error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    /// A template engine error, annotated with what was being rendered
    #[error("rendering {target} of '{}' with data {data}: {source}", path.display())]
    TemplateError {
        target: TemplateTarget,
        path: PathBuf,
        data: String,
        #[source]
        source: Box<Error>,
    },

    /// Symlinks, sockets, devices and fifos are not copied
    #[error("'{}' is not a regular file or directory", path.display())]
    UnsupportedEntry { path: PathBuf },

    #[error("'{}' is not valid UTF-8", path.display())]
    InvalidName { path: PathBuf },

    #[error("Usage error: {0}")]
    UsageError(String),
}

/// Convenience type alias for Results with copydir's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Prints the error prefixed by the tool name and exits with status 1.
pub fn default_error_handler(err: Error) {
    eprintln!("copydir: error: {err}");
    std::process::exit(1);
}
