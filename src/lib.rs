//! copydir recursively copies a directory tree, renaming directories through a
//! pluggable policy and optionally rendering file names and contents as
//! templates. It exists to materialize fixture trees for tests, such as a
//! `.git` directory stored as `dot.git`.

/// Command-line interface module for the copydir binary
pub mod cli;

/// Recursive copy with renaming and template processing
pub mod copier;

/// Error types and handling for copydir
pub mod error;

/// Test-lifecycle helpers: working-directory guard and tree listing
pub mod fixture;

/// Directory rename policies
pub mod rename;

/// Template rendering with MiniJinja
pub mod renderer;

pub use copier::{copy_tree, TemplateData, TemplateScope, TreeCopier};
pub use rename::{dot_rename, identity_rename, Rename, RenamePolicy};
