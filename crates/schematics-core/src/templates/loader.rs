//! Template loading from the embedded set or a local directory

use super::manifest::TemplateManifest;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MANIFEST_FILE: &str = "template.yaml";

/// Library template shipped inside the binary
const BUILTIN_FILES: &[(&str, &str)] = &[
    (
        MANIFEST_FILE,
        include_str!("../../templates/lib/template.yaml"),
    ),
    ("README.md", include_str!("../../templates/lib/README.md")),
    (
        "tsconfig.json",
        include_str!("../../templates/lib/tsconfig.json"),
    ),
    (
        "tsconfig.lib.json",
        include_str!("../../templates/lib/tsconfig.lib.json"),
    ),
    (
        "tsconfig.spec.json",
        include_str!("../../templates/lib/tsconfig.spec.json"),
    ),
    ("tslint.json", include_str!("../../templates/lib/tslint.json")),
    (
        "jest.config.js",
        include_str!("../../templates/lib/jest.config.js"),
    ),
    ("src/index.ts", include_str!("../../templates/lib/src/index.ts")),
    (
        "src/lib/__fileName__.ts",
        include_str!("../../templates/lib/src/lib/__fileName__.ts"),
    ),
    (
        "src/lib/__fileName__.spec.ts",
        include_str!("../../templates/lib/src/lib/__fileName__.spec.ts"),
    ),
];

/// Where library templates come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin,
    Local(PathBuf),
}

impl TemplateSource {
    /// Pick the source: explicit directory, then the product's env var, then builtin
    pub fn from_config<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Self {
        template_dir
            .or_else(|| std::env::var_os(config.template_dir_env()).map(PathBuf::from))
            .map(Self::Local)
            .unwrap_or(Self::Builtin)
    }

    /// Load the template set from this source
    pub fn load(&self) -> Result<TemplateSet> {
        match self {
            Self::Builtin => TemplateSet::builtin(),
            Self::Local(path) => TemplateSet::from_dir(path),
        }
    }
}

/// A manifest together with the raw content of every template file
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub manifest: TemplateManifest,
    files: BTreeMap<String, Vec<u8>>,
}

impl TemplateSet {
    /// The library template embedded in the binary
    pub fn builtin() -> Result<Self> {
        let mut files: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        for (path, content) in BUILTIN_FILES {
            files.insert(path.to_string(), content.as_bytes().to_vec());
        }
        Self::from_files(files, "builtin")
    }

    /// Load a template from a local directory containing `template.yaml`
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("Template directory not found: {}", dir.display());
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest_content = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        let manifest: TemplateManifest = serde_yaml::from_str(&manifest_content)
            .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

        let listed = if manifest.files.is_empty() {
            Self::walk_files(dir)?
        } else {
            manifest.files.clone()
        };

        let mut files = BTreeMap::new();
        files.insert(MANIFEST_FILE.to_string(), manifest_content.into_bytes());
        for file in listed {
            let full_path = file.split('/').fold(dir.to_path_buf(), |p, s| p.join(s));
            let content = std::fs::read(&full_path)
                .with_context(|| format!("Failed to read template file {}", full_path.display()))?;
            files.insert(file, content);
        }

        Self::from_files(files, &dir.display().to_string())
    }

    /// Every file under `dir` except the manifest, as `/`-separated relative paths
    fn walk_files(dir: &Path) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(dir).with_context(|| {
                format!("{} is outside {}", entry.path().display(), dir.display())
            })?;
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            if relative != MANIFEST_FILE {
                files.push(relative);
            }
        }
        Ok(files)
    }

    fn from_files(files: BTreeMap<String, Vec<u8>>, origin: &str) -> Result<Self> {
        let manifest_bytes = files
            .get(MANIFEST_FILE)
            .ok_or_else(|| anyhow::anyhow!("Template '{}' is missing {}", origin, MANIFEST_FILE))?;
        let mut manifest: TemplateManifest = serde_yaml::from_slice(manifest_bytes)
            .with_context(|| format!("Failed to parse template '{}' manifest", origin))?;

        if manifest.files.is_empty() {
            manifest.files = files
                .keys()
                .filter(|k| k.as_str() != MANIFEST_FILE)
                .cloned()
                .collect();
        }

        for file in &manifest.files {
            if !files.contains_key(file) {
                anyhow::bail!("File '{}' not found in template '{}'", file, origin);
            }
        }

        Ok(Self { manifest, files })
    }

    /// Raw content of a template file
    pub fn file(&self, path: &str) -> Result<&[u8]> {
        self.files
            .get(path)
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow::anyhow!("File '{}' not found in template", path))
    }
}
