//! Workspace-level registration of a generated library
//!
//! When the workspace root carries `nx.json` and `tsconfig.json`, a new
//! library is added to the project list and gets an import path mapping.
//! Workspaces without those files are left alone.

use super::LibraryOptions;
use crate::json::{merge_patch, parse_document, to_pretty};
use crate::tree::Tree;
use anyhow::{Context, Result};
use serde_json::{json, Value};

pub const NX_JSON: &str = "nx.json";
pub const ROOT_TSCONFIG: &str = "tsconfig.json";
pub const DEFAULT_NPM_SCOPE: &str = "proj";

fn read_json(tree: &dyn Tree, path: &str) -> Result<Option<Value>> {
    let Some(bytes) = tree.read(path)? else {
        return Ok(None);
    };
    let value = parse_document(&bytes).with_context(|| format!("Failed to parse {}", path))?;
    Ok(Some(value))
}

fn patch_json(tree: &mut dyn Tree, path: &str, patch: &Value) -> Result<bool> {
    let Some(mut doc) = read_json(tree, path)? else {
        return Ok(false);
    };
    merge_patch(&mut doc, patch);
    tree.overwrite(path, to_pretty(&doc).into_bytes())
        .with_context(|| format!("Failed to update {}", path))?;
    Ok(true)
}

/// The workspace npm scope from `nx.json`, or the default one
pub fn npm_scope(tree: &dyn Tree) -> Result<String> {
    let scope = read_json(tree, NX_JSON)?
        .and_then(|nx| nx.get("npmScope").and_then(Value::as_str).map(String::from))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_NPM_SCOPE.to_string());
    Ok(scope)
}

/// Register the library in `nx.json` and the root `tsconfig.json` path map
pub fn register_project(
    tree: &mut dyn Tree,
    options: &LibraryOptions,
    npm_scope: &str,
) -> Result<()> {
    let project_name = options.project_name();

    let nx_patch = json!({
        "projects": { project_name.as_str(): { "tags": options.tag_list() } }
    });
    if patch_json(tree, NX_JSON, &nx_patch)? {
        tracing::debug!(project = %project_name, "registered project in {}", NX_JSON);
    }

    let import_path = format!("@{}/{}", npm_scope, options.name);
    let entry_point = format!("{}/src/index.ts", options.project_root());
    let paths_patch = json!({
        "compilerOptions": { "paths": { import_path.as_str(): [entry_point] } }
    });
    if patch_json(tree, ROOT_TSCONFIG, &paths_patch)? {
        tracing::debug!(import = %import_path, "added path mapping to {}", ROOT_TSCONFIG);
    }

    Ok(())
}
