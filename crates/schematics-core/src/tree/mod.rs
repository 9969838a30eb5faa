//! Virtual file tree that generators and the scaffolder write through
//!
//! This module provides:
//! - The `Tree` trait, the workspace mutation provider every step works against
//! - `MemoryTree`, an in-memory tree used for tests and as a staging area
//! - `HostTree`, a tree rooted at a real directory that persists on `commit()`
//!
//! Paths are always `/`-separated and relative to the workspace root.

pub mod host;
pub mod memory;

use std::fmt;
use thiserror::Error;

pub use host::HostTree;
pub use memory::MemoryTree;

/// Errors raised by tree operations
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("file already exists: {0}")]
    AlreadyExists(String),

    #[error("file does not exist: {0}")]
    NotFound(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Kind of change recorded against a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Create,
    Update,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Create => write!(f, "CREATE"),
            ActionKind::Update => write!(f, "UPDATE"),
        }
    }
}

/// A single recorded change, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub path: String,
    pub size: usize,
}

/// Workspace mutation provider
///
/// Implementations give per-file atomicity: `overwrite` replaces the whole
/// content of a file in one call, never a prefix of it.
pub trait Tree {
    /// Whether a file exists at `path`
    fn exists(&self, path: &str) -> bool;

    /// Read a file; `Ok(None)` when it does not exist
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>, TreeError>;

    /// Create a new file; fails if one already exists
    fn create(&mut self, path: &str, content: Vec<u8>) -> Result<(), TreeError>;

    /// Replace the content of an existing file
    fn overwrite(&mut self, path: &str, content: Vec<u8>) -> Result<(), TreeError>;

    /// Changes made through this tree so far
    fn actions(&self) -> &[Action];
}

/// Normalize a tree path: strips leading `./` and `/`, rejects `..`,
/// backslashes and empty segments
pub fn normalize_path(path: &str) -> Result<String, TreeError> {
    let invalid = |reason| TreeError::InvalidPath {
        path: path.to_string(),
        reason,
    };

    if path.contains('\\') {
        return Err(invalid("backslashes are not allowed"));
    }

    let mut trimmed = path;
    loop {
        if let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            trimmed = rest;
        } else {
            break;
        }
    }

    if trimmed.is_empty() {
        return Err(invalid("path is empty"));
    }

    for segment in trimmed.split('/') {
        match segment {
            "" => return Err(invalid("empty path segment")),
            "." | ".." => return Err(invalid("relative segments are not allowed")),
            _ => {}
        }
    }

    Ok(trimmed.to_string())
}

/// Record a change; a file created and later overwritten in the same run
/// stays a single CREATE
pub(crate) fn record_action(actions: &mut Vec<Action>, kind: ActionKind, path: &str, size: usize) {
    if let Some(existing) = actions.iter_mut().find(|a| a.path == path) {
        existing.size = size;
        return;
    }
    actions.push(Action {
        kind,
        path: path.to_string(),
        size,
    });
}
