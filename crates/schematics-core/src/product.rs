//! Product configuration trait for CLI binaries
//!
//! A binary built on this crate implements `ProductConfig` to give the
//! workflow its identity, its configuration hooks and its closing hints.

use crate::request::ScaffoldRequest;
use std::path::Path;

/// Configuration trait for scaffolding CLI products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable that points at a local template directory
    fn template_dir_env(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Instructions printed after a library was created
    fn next_steps(&self, root: &Path, request: &ScaffoldRequest) -> Vec<String>;
}
