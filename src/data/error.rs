//! Errors raised while building the unified dataset.

use std::path::PathBuf;

use thiserror::Error;

/// Any failure aborts the whole load; there is no partial dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A listed file is missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row lacks a column the schema mapping expects.
    #[error("{}: missing column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A row is malformed or one of its fields does not parse.
    #[error("{}, line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Two listed files would share one `test_id`.
    #[error("{first} and {second} both map to test id '{test_id}'")]
    DuplicateTestId {
        test_id: String,
        first: String,
        second: String,
    },

    /// The schema mapping itself is unusable.
    #[error("invalid schema mapping: {0}")]
    Schema(String),
}

pub type LoadResult<T> = Result<T, LoadError>;
