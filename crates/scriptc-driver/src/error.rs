//! Driver-level errors: failures outside the four pipeline stages
//! (file I/O), which §1 scopes out of the core and into this external
//! collaborator.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read {path}: {source}")]
    ReadSource { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to write {path}: {source}")]
    WriteOutput { path: PathBuf, #[source] source: std::io::Error },
}
