//! Template manifest types and parsing

use serde::{Deserialize, Serialize};

/// Library template manifest (`template.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Explicit list of files to render, relative to the template root.
    /// Local templates may leave this empty to use every file in the directory.
    #[serde(default)]
    pub files: Vec<String>,

    /// Patterns of files that only make sense with a unit test runner;
    /// skipped when the library is generated with `unitTestRunner: none`
    #[serde(default)]
    pub test_files: Vec<String>,
}

impl TemplateManifest {
    /// Check if a filename matches any pattern in a list
    fn matches_any(filename: &str, patterns: &[String]) -> bool {
        patterns.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                // Suffix match: *.spec.ts matches foo.spec.ts
                filename.ends_with(suffix)
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                // Prefix match: jest* matches jest.config.js
                filename.starts_with(prefix)
            } else {
                filename == pattern
            }
        })
    }

    /// Whether a template file belongs to the unit test runner
    pub fn is_test_file(&self, file_path: &str) -> bool {
        let filename = file_path.rsplit('/').next().unwrap_or(file_path);
        Self::matches_any(filename, &self.test_files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> TemplateManifest {
        serde_yaml::from_str(
            r#"
name: lib
description: Plain library
version: 0.1.0
files:
  - README.md
  - jest.config.js
  - src/lib/__fileName__.spec.ts
test_files:
  - "jest*"
  - "*.spec.ts"
  - tsconfig.spec.json
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_manifest() {
        let m = manifest();
        assert_eq!(m.name, "lib");
        assert_eq!(m.version, "0.1.0");
        assert_eq!(m.files.len(), 3);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let m: TemplateManifest =
            serde_yaml::from_str("name: x\ndescription: y\nversion: 1.0.0\n").unwrap();
        assert!(m.files.is_empty());
        assert!(m.test_files.is_empty());
        assert!(!m.is_test_file("jest.config.js"));
    }

    #[test]
    fn test_is_test_file() {
        let m = manifest();
        assert!(m.is_test_file("jest.config.js"));
        assert!(m.is_test_file("src/lib/__fileName__.spec.ts"));
        assert!(m.is_test_file("tsconfig.spec.json"));
        assert!(!m.is_test_file("README.md"));
        assert!(!m.is_test_file("src/index.ts"));
    }
}
