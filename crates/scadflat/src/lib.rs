// src/lib.rs
//
// A single FlattenError covers the traversal core and the CLI glue.

pub mod classify;
pub mod flatten;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use flatten::{Flattener, flatten_file};

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("cannot read file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
