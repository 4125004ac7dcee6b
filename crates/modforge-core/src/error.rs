//! Error taxonomy for the merge/commit side of generation
//!
//! Resolver-level problems (unknown modules, unsatisfied capabilities,
//! conflicts) are data on the [`Resolution`](crate::resolver::Resolution),
//! never errors: an interactive caller must be able to show them without
//! crashing. Merge and commit problems are fatal to the whole generate
//! call, because a partial write would corrupt the target project.

use std::path::PathBuf;
use thiserror::Error;

/// A template could not be merged. Raised during staging, before any file
/// is written, so the target directory is untouched.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("module '{module}' contributed invalid JSON to '{path}': {source}")]
    InvalidJson {
        path: String,
        module: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("module '{module}' references unknown custom merge function '{name}' for '{path}'")]
    UnknownMergeFunction {
        path: String,
        module: String,
        name: String,
    },

    #[error("custom merge function '{name}' failed on '{path}': {message}")]
    CustomMergeFailed {
        path: String,
        name: String,
        message: String,
    },

    #[error(
        "custom merge function '{name}' returned a {returned} value for '{path}' \
         where {expected} was expected"
    )]
    CustomMergeShape {
        path: String,
        name: String,
        expected: &'static str,
        returned: &'static str,
    },

    #[error("template for '{path}' in module '{module}' references undefined variable '{variable}'")]
    UndefinedVariable {
        path: String,
        module: String,
        variable: String,
    },
}

/// A generate call failed. Staging errors leave the target untouched;
/// commit errors trigger removal of everything written in this run before
/// the error is surfaced.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
