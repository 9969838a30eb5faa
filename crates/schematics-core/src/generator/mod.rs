//! Base library generation
//!
//! The scaffolder never writes the library skeleton itself; it delegates to a
//! `LibraryGenerator`. `TemplateGenerator` is the shipped implementation: it
//! renders a template set into `libs/<name>/` and registers the new project
//! with the workspace.

pub mod workspace;

use crate::names::names;
use crate::templates::{TemplateSet, TemplateVars};
use crate::tree::Tree;
use anyhow::{Context, Result};
use serde::Serialize;

/// Options handed to the base library generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryOptions {
    /// Sub-directory under `libs/`; empty for the root
    pub directory: String,
    pub name: String,
    pub style: String,
    pub framework: String,
    /// Comma-separated project tags
    pub tags: String,
    pub unit_test_runner: String,
}

impl LibraryOptions {
    /// The fixed option set the react-lib scaffolder always generates with
    pub fn for_library(name: &str) -> Self {
        Self {
            directory: String::new(),
            name: name.to_string(),
            style: "scss".to_string(),
            framework: "none".to_string(),
            tags: String::new(),
            unit_test_runner: "jest".to_string(),
        }
    }

    /// Workspace-relative project root, e.g. `libs/ui`
    pub fn project_root(&self) -> String {
        if self.directory.is_empty() {
            format!("libs/{}", self.name)
        } else {
            format!("libs/{}/{}", self.directory.trim_matches('/'), self.name)
        }
    }

    /// Project key used in `nx.json`, e.g. `shared-ui`
    pub fn project_name(&self) -> String {
        let full = if self.directory.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.directory, self.name)
        };
        names(&full).file_name
    }

    /// Parsed tag list
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    fn with_tests(&self) -> bool {
        self.unit_test_runner != "none"
    }

    fn validate(&self) -> Result<()> {
        if self.framework != "none" {
            anyhow::bail!(
                "Unsupported framework '{}': only 'none' is available",
                self.framework
            );
        }
        if !matches!(self.unit_test_runner.as_str(), "jest" | "none") {
            anyhow::bail!(
                "Unsupported unit test runner '{}': expected 'jest' or 'none'",
                self.unit_test_runner
            );
        }
        Ok(())
    }
}

/// Produces the initial file tree of a new library
pub trait LibraryGenerator {
    fn generate(&self, tree: &mut dyn Tree, options: &LibraryOptions) -> Result<()>;
}

/// Generator that renders a template set into the tree
pub struct TemplateGenerator {
    templates: TemplateSet,
}

/// Number of `../` needed to reach the workspace root from `project_root`
fn offset_from_root(project_root: &str) -> String {
    "../".repeat(project_root.split('/').filter(|s| !s.is_empty()).count())
}

impl TemplateGenerator {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    fn vars(options: &LibraryOptions, npm_scope: &str) -> TemplateVars {
        let n = names(&options.name);
        let project_root = options.project_root();

        let mut vars = TemplateVars::new();
        vars.set("name", options.name.clone())
            .set("fileName", n.file_name)
            .set("className", n.class_name)
            .set("propertyName", n.property_name)
            .set("constantName", n.constant_name)
            .set("projectName", options.project_name())
            .set("offsetFromRoot", offset_from_root(&project_root))
            .set("projectRoot", project_root)
            .set("style", options.style.clone())
            .set("unitTestRunner", options.unit_test_runner.clone())
            .set("npmScope", npm_scope)
            .set("tags", options.tag_list().join(","));
        vars
    }
}

impl LibraryGenerator for TemplateGenerator {
    fn generate(&self, tree: &mut dyn Tree, options: &LibraryOptions) -> Result<()> {
        options.validate()?;

        let npm_scope = workspace::npm_scope(tree)?;
        let vars = Self::vars(options, &npm_scope);
        let project_root = options.project_root();
        let manifest = &self.templates.manifest;

        tracing::debug!(
            template = %manifest.name,
            root = %project_root,
            "rendering library template"
        );

        for file in &manifest.files {
            if !options.with_tests() && manifest.is_test_file(file) {
                continue;
            }

            let content = self.templates.file(file)?;
            let dest = format!("{}/{}", project_root, vars.render_path(file));
            let rendered = vars.render_bytes(content, file)?;
            tree.create(&dest, rendered)
                .with_context(|| format!("Failed to create {}", dest))?;
        }

        workspace::register_project(tree, options, &npm_scope)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemoryTree;

    fn generator() -> TemplateGenerator {
        TemplateGenerator::new(TemplateSet::builtin().unwrap())
    }

    #[test]
    fn test_fixed_options() {
        let options = LibraryOptions::for_library("ui");
        assert_eq!(options.directory, "");
        assert_eq!(options.name, "ui");
        assert_eq!(options.style, "scss");
        assert_eq!(options.framework, "none");
        assert_eq!(options.tags, "");
        assert_eq!(options.unit_test_runner, "jest");
    }

    #[test]
    fn test_options_serialize_camel_case() {
        let json = serde_json::to_value(LibraryOptions::for_library("ui")).unwrap();
        assert_eq!(json["unitTestRunner"], "jest");
        assert_eq!(json["directory"], "");
    }

    #[test]
    fn test_project_root_and_name() {
        let mut options = LibraryOptions::for_library("ui");
        assert_eq!(options.project_root(), "libs/ui");
        assert_eq!(options.project_name(), "ui");

        options.directory = "shared".to_string();
        assert_eq!(options.project_root(), "libs/shared/ui");
        assert_eq!(options.project_name(), "shared-ui");
    }

    #[test]
    fn test_offset_from_root() {
        assert_eq!(offset_from_root("libs/ui"), "../../");
        assert_eq!(offset_from_root("libs/shared/ui"), "../../../");
    }

    #[test]
    fn test_tag_list() {
        let mut options = LibraryOptions::for_library("ui");
        assert!(options.tag_list().is_empty());
        options.tags = "scope:shared, type:ui,".to_string();
        assert_eq!(options.tag_list(), vec!["scope:shared", "type:ui"]);
    }

    #[test]
    fn test_generate_renders_library() {
        let mut tree = MemoryTree::new();
        generator()
            .generate(&mut tree, &LibraryOptions::for_library("ui"))
            .unwrap();

        let files: Vec<_> = tree.files().collect();
        assert_eq!(
            files,
            vec![
                "libs/ui/README.md",
                "libs/ui/jest.config.js",
                "libs/ui/src/index.ts",
                "libs/ui/src/lib/ui.spec.ts",
                "libs/ui/src/lib/ui.ts",
                "libs/ui/tsconfig.json",
                "libs/ui/tsconfig.lib.json",
                "libs/ui/tsconfig.spec.json",
                "libs/ui/tslint.json",
            ]
        );

        let config = tree.get_str("libs/ui/tsconfig.json").unwrap();
        assert!(config.contains("\"extends\": \"../../tsconfig.json\""));
        assert_eq!(
            tree.get_str("libs/ui/src/index.ts").unwrap().trim(),
            "export * from './lib/ui';"
        );
        assert!(tree
            .get_str("libs/ui/jest.config.js")
            .unwrap()
            .contains("coverage/libs/ui"));
    }

    #[test]
    fn test_generate_without_test_runner_skips_test_files() {
        let mut options = LibraryOptions::for_library("ui");
        options.unit_test_runner = "none".to_string();

        let mut tree = MemoryTree::new();
        generator().generate(&mut tree, &options).unwrap();

        assert!(tree.exists("libs/ui/tsconfig.json"));
        assert!(!tree.exists("libs/ui/jest.config.js"));
        assert!(!tree.exists("libs/ui/tsconfig.spec.json"));
        assert!(!tree.exists("libs/ui/src/lib/ui.spec.ts"));
    }

    #[test]
    fn test_generate_rejects_unsupported_options() {
        let mut options = LibraryOptions::for_library("ui");
        options.framework = "angular".to_string();
        let mut tree = MemoryTree::new();
        assert!(generator().generate(&mut tree, &options).is_err());
        assert!(tree.is_empty());

        let mut options = LibraryOptions::for_library("ui");
        options.unit_test_runner = "karma".to_string();
        assert!(generator().generate(&mut tree, &options).is_err());
    }

    #[test]
    fn test_generate_twice_fails() {
        let mut tree = MemoryTree::new();
        let options = LibraryOptions::for_library("ui");
        generator().generate(&mut tree, &options).unwrap();

        let err = generator().generate(&mut tree, &options).unwrap_err();
        assert!(format!("{:#}", err).contains("already exists"));
    }
}
