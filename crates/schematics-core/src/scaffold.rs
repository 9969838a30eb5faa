//! The react-lib scaffolder
//!
//! Generates a base library through a `LibraryGenerator`, then switches its
//! `tsconfig.json` over to React: `compilerOptions.jsx` becomes `"react"`
//! and `include` becomes `["**/*.ts"]`. Everything else in the document is
//! kept, including key order.
//!
//! Generation and the config update are not transactional. If the update
//! fails the generated library stays as it is, and `configure_library` can
//! be run on its own to finish the job.

use crate::generator::{LibraryGenerator, LibraryOptions};
use crate::json::{merge_patch, parse_document, to_pretty, JsonError};
use crate::request::{RequestError, ScaffoldRequest};
use crate::tree::{Tree, TreeError};
use serde_json::{json, Value};
use thiserror::Error;

/// Compiler option value that enables JSX templating
pub const JSX_MODE: &str = "react";

/// Sole include pattern of a scaffolded library
pub const INCLUDE_PATTERN: &str = "**/*.ts";

/// Errors raised by a scaffold run, one per failing stage
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    #[error("base library generation failed: {0:#}")]
    GeneratorFailure(anyhow::Error),

    #[error("config file missing: {path}")]
    MissingConfig { path: String },

    #[error("failed to read {path}: {source}")]
    ReadFailure {
        path: String,
        #[source]
        source: TreeError,
    },

    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: JsonError,
    },

    #[error("failed to write {path}: {source}")]
    WriteFailure {
        path: String,
        #[source]
        source: TreeError,
    },
}

impl ScaffoldError {
    /// Whether the base library was generated before the failure
    pub fn after_generation(&self) -> bool {
        !matches!(
            self,
            ScaffoldError::InvalidRequest(_) | ScaffoldError::GeneratorFailure(_)
        )
    }
}

/// Merge patch applied to every scaffolded library config
fn react_options_patch() -> Value {
    json!({
        "compilerOptions": { "jsx": JSX_MODE },
        "include": [INCLUDE_PATTERN]
    })
}

/// Switch a parsed config document to React; applying it twice is a no-op
pub fn apply_react_options(doc: &mut Value) {
    merge_patch(doc, &react_options_patch());
}

/// Read, patch and rewrite `libs/<name>/tsconfig.json`
///
/// Touches no other file. The new content replaces the old in a single
/// `overwrite`.
pub fn configure_library(
    tree: &mut dyn Tree,
    request: &ScaffoldRequest,
) -> Result<(), ScaffoldError> {
    let path = request.config_path();

    let bytes = tree
        .read(&path)
        .map_err(|source| ScaffoldError::ReadFailure {
            path: path.clone(),
            source,
        })?
        .ok_or_else(|| ScaffoldError::MissingConfig { path: path.clone() })?;

    let mut doc = parse_document(&bytes).map_err(|source| ScaffoldError::InvalidJson {
        path: path.clone(),
        source,
    })?;

    apply_react_options(&mut doc);

    tree.overwrite(&path, to_pretty(&doc).into_bytes())
        .map_err(|source| ScaffoldError::WriteFailure {
            path: path.clone(),
            source,
        })?;

    tracing::debug!(path = %path, "applied react compiler options");
    Ok(())
}

/// Runs the generate-then-configure pipeline with an injected generator
pub struct Scaffolder<G> {
    generator: G,
}

impl<G: LibraryGenerator> Scaffolder<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate the base library, then configure it for React
    pub fn scaffold(
        &self,
        tree: &mut dyn Tree,
        request: &ScaffoldRequest,
    ) -> Result<(), ScaffoldError> {
        let options = LibraryOptions::for_library(request.name());
        tracing::debug!(?options, "generating base library");

        self.generator
            .generate(tree, &options)
            .map_err(ScaffoldError::GeneratorFailure)?;

        configure_library(tree, request)
    }
}
