//! Error type shared by every fallible operation in the crate.
//!
//! All failures are detected close to their source and propagated with `?`
//! to the binary, which prints the display form and exits non-zero. The
//! engine either writes a complete rank list or writes nothing.
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkerError {
    #[error("could not open file: {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{}: {}", .path.display(), .line, .msg)]
    Parse {
        path: PathBuf,
        line: usize,
        msg: String,
    },
    #[error("could not parse profile {}: {}", .path.display(), .msg)]
    Profile { path: PathBuf, msg: String },
    #[error("seed node {node} is not in the network. Seeds: {seeds:?}")]
    SeedNotFound { node: String, seeds: Vec<String> },
    #[error("node {0} is not in the network")]
    UnknownNode(String),
    #[error("walk did not converge within {0} rounds")]
    NoConvergence(usize),
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

impl WalkerError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        WalkerError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
    /// A malformed record. `line` is 1-based.
    pub fn parse<T: Into<String>>(path: &Path, line: usize, msg: T) -> Self {
        WalkerError::Parse {
            path: path.to_path_buf(),
            line,
            msg: msg.into(),
        }
    }
}
