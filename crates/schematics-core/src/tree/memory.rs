//! In-memory file tree

use super::{normalize_path, record_action, Action, ActionKind, Tree, TreeError};
use std::collections::BTreeMap;

/// Ordered in-memory tree of files
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: BTreeMap<String, Vec<u8>>,
    actions: Vec<Action>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from existing files without recording any actions
    pub fn from_files<I, P, C>(files: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<Vec<u8>>,
    {
        let mut tree = Self::new();
        for (path, content) in files {
            let path = normalize_path(path.as_ref())?;
            tree.files.insert(path, content.into());
        }
        Ok(tree)
    }

    /// All file paths in sorted order
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Paths and contents in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_slice()))
    }

    /// Borrow a file's content
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        let path = normalize_path(path).ok()?;
        self.files.get(&path).map(Vec::as_slice)
    }

    /// Borrow a file's content as UTF-8 text
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|c| std::str::from_utf8(c).ok())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Tree for MemoryTree {
    fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    fn read(&self, path: &str) -> Result<Option<Vec<u8>>, TreeError> {
        let path = normalize_path(path)?;
        Ok(self.files.get(&path).cloned())
    }

    fn create(&mut self, path: &str, content: Vec<u8>) -> Result<(), TreeError> {
        let path = normalize_path(path)?;
        if self.files.contains_key(&path) {
            return Err(TreeError::AlreadyExists(path));
        }
        record_action(&mut self.actions, ActionKind::Create, &path, content.len());
        self.files.insert(path, content);
        Ok(())
    }

    fn overwrite(&mut self, path: &str, content: Vec<u8>) -> Result<(), TreeError> {
        let path = normalize_path(path)?;
        let Some(slot) = self.files.get_mut(&path) else {
            return Err(TreeError::NotFound(path));
        };
        record_action(&mut self.actions, ActionKind::Update, &path, content.len());
        *slot = content;
        Ok(())
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }
}
