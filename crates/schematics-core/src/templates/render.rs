//! Placeholder substitution for template paths and contents
//!
//! Paths use `__key__`, contents use `<%= key %>`. A content placeholder that
//! names an unknown key fails the render.

use anyhow::Result;
use std::collections::BTreeMap;

const OPEN: &str = "<%=";
const CLOSE: &str = "%>";

/// Values available to templates
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    values: BTreeMap<&'static str, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Replace `__key__` markers in a template path
    pub fn render_path(&self, path: &str) -> String {
        self.values
            .iter()
            .fold(path.to_string(), |acc, (key, value)| {
                acc.replace(&format!("__{}__", key), value)
            })
    }

    /// Replace `<%= key %>` placeholders in template text
    pub fn render_str(&self, template: &str, origin: &str) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                anyhow::bail!("Unterminated placeholder in template file {}", origin);
            };

            let key = after_open[..end].trim();
            let value = self.get(key).ok_or_else(|| {
                anyhow::anyhow!("Unknown template variable '{}' in {}", key, origin)
            })?;
            out.push_str(value);
            rest = &after_open[end + CLOSE.len()..];
        }
        out.push_str(rest);

        Ok(out)
    }

    /// Render a template file; content that is not UTF-8 is copied as is
    pub fn render_bytes(&self, content: &[u8], origin: &str) -> Result<Vec<u8>> {
        match std::str::from_utf8(content) {
            Ok(text) => Ok(self.render_str(text, origin)?.into_bytes()),
            Err(_) => Ok(content.to_vec()),
        }
    }
}
