//! Validated scaffold requests
//!
//! A request is built either from a plain library name or from a JSON
//! options document. Only `name` is read from the document; every other key
//! is ignored and reported back so the caller can tell the user.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while building a request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("library name must not be empty")]
    EmptyName,

    #[error("invalid library name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("invalid options document: {0}")]
    Options(String),
}

/// Input of a scaffold run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldRequest {
    name: String,
}

/// A request parsed from an options document, with the keys it ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub request: ScaffoldRequest,
    pub ignored: Vec<String>,
}

#[derive(Deserialize)]
struct RawOptions {
    name: String,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl ScaffoldRequest {
    /// Validate a library name
    ///
    /// A name is one or more `/`-separated segments. Each segment starts with
    /// an ASCII letter and holds only ASCII letters, digits, `-` and `_`.
    pub fn new(name: impl Into<String>) -> Result<Self, RequestError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RequestError::EmptyName);
        }

        let invalid = |reason| RequestError::InvalidName {
            name: name.clone(),
            reason,
        };

        for segment in trimmed.split('/') {
            let mut chars = segment.chars();
            match chars.next() {
                None => return Err(invalid("empty path segment")),
                Some(c) if !c.is_ascii_alphabetic() => {
                    return Err(invalid("each segment must start with a letter"))
                }
                Some(_) => {}
            }
            if !chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
                return Err(invalid(
                    "only letters, digits, '-', '_' and '/' are allowed",
                ));
            }
        }

        Ok(Self {
            name: trimmed.to_string(),
        })
    }

    /// Parse an options document such as `{"name": "ui", "style": "css"}`
    pub fn from_options_json(text: &str) -> Result<ParsedRequest, RequestError> {
        let raw: RawOptions =
            serde_json::from_str(text).map_err(|e| RequestError::Options(e.to_string()))?;

        let request = Self::new(raw.name)?;
        let ignored = raw.rest.keys().cloned().collect();

        Ok(ParsedRequest { request, ignored })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Workspace-relative root of the library (`libs/<name>`)
    pub fn project_root(&self) -> String {
        format!("libs/{}", self.name)
    }

    /// Path of the library's compiler config (`libs/<name>/tsconfig.json`)
    pub fn config_path(&self) -> String {
        format!("{}/tsconfig.json", self.project_root())
    }
}
