//! Schematics Core - Library scaffolding for React UI libraries in an Nx workspace
//!
//! The core operation generates a base library under `libs/<name>/` and then
//! switches its `tsconfig.json` to React (`compilerOptions.jsx = "react"`,
//! `include = ["**/*.ts"]`), leaving every other setting untouched.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - `Tree` file abstraction, JSON merge patches,
//!   template rendering, `LibraryGenerator` and the `Scaffolder` pipeline
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the
//!   `workflow` functions that run against a workspace directory
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use schematics_core::{MemoryTree, Scaffolder, ScaffoldRequest, TemplateGenerator, TemplateSet};
//!
//! let generator = TemplateGenerator::new(TemplateSet::builtin()?);
//! let mut tree = MemoryTree::new();
//! Scaffolder::new(generator).scaffold(&mut tree, &ScaffoldRequest::new("ui")?)?;
//! ```

pub mod generator;
pub mod json;
pub mod names;
pub mod product;
pub mod request;
pub mod scaffold;
pub mod templates;
pub mod tree;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use generator::{LibraryGenerator, LibraryOptions, TemplateGenerator};
pub use product::ProductConfig;
pub use request::{ParsedRequest, RequestError, ScaffoldRequest};
pub use scaffold::{apply_react_options, configure_library, ScaffoldError, Scaffolder};
pub use templates::{TemplateManifest, TemplateSet, TemplateSource};
pub use tree::{Action, ActionKind, HostTree, MemoryTree, Tree, TreeError};
pub use workflow::{ConfigureArgs, GenerateArgs, Outcome};

#[cfg(feature = "tui")]
pub use tui::run;
