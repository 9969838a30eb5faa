//! Library templates: manifests, loading and rendering
//!
//! This module provides:
//! - The template manifest type (`template.yaml`)
//! - Loading from the embedded template set or a local directory
//! - Placeholder rendering for paths and file contents
//! - Version compatibility checking

pub mod loader;
pub mod manifest;
pub mod render;
pub mod version;

pub use loader::{TemplateSet, TemplateSource};
pub use manifest::TemplateManifest;
pub use render::TemplateVars;
pub use version::check_compatibility;
