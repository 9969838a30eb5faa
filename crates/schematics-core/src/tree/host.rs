//! File tree backed by a workspace directory on disk
//!
//! Reads fall through from the staged changes to the disk. Writes are only
//! staged; nothing touches the disk until `commit()` runs at the end of an
//! operation, so a failed run leaves the workspace as it was.

use super::{normalize_path, record_action, Action, ActionKind, Tree, TreeError};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Tree rooted at a workspace directory
#[derive(Debug)]
pub struct HostTree {
    root: PathBuf,
    staged: BTreeMap<String, Vec<u8>>,
    actions: Vec<Action>,
}

impl HostTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            staged: BTreeMap::new(),
            actions: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a normalized tree path onto the host filesystem
    fn host_path(&self, path: &str) -> PathBuf {
        path.split('/').fold(self.root.clone(), |p, s| p.join(s))
    }

    fn exists_normalized(&self, path: &str) -> bool {
        self.staged.contains_key(path) || self.host_path(path).is_file()
    }

    /// Persist every staged file, replacing each target in a single rename
    ///
    /// Returns the number of files written. A file leaves the staging area
    /// only once it is on disk, so after an error `pending()` still counts
    /// the unwritten files and `commit()` can be retried.
    pub fn commit(&mut self) -> Result<usize, TreeError> {
        let paths: Vec<String> = self.staged.keys().cloned().collect();
        let mut written = 0;

        for path in paths {
            if let Some(content) = self.staged.get(&path) {
                self.persist(&path, content)?;
                tracing::debug!(path = %path, bytes = content.len(), "committed file");
            }
            self.staged.remove(&path);
            written += 1;
        }

        Ok(written)
    }

    /// Write one file through a uniquely named sibling temporary file
    fn persist(&self, path: &str, content: &[u8]) -> Result<(), TreeError> {
        let io_err = |path: &Path, source| TreeError::Io {
            path: path.display().to_string(),
            source,
        };

        let target = self.host_path(path);
        let parent = target.parent().unwrap_or(self.root.as_path());
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| io_err(parent, e))?;
        temp.write_all(content).map_err(|e| io_err(temp.path(), e))?;
        temp.persist(&target).map_err(|e| io_err(&target, e.error))?;
        Ok(())
    }

    /// Number of files waiting for `commit()`
    pub fn pending(&self) -> usize {
        self.staged.len()
    }
}

impl Tree for HostTree {
    fn exists(&self, path: &str) -> bool {
        match normalize_path(path) {
            Ok(path) => self.exists_normalized(&path),
            Err(_) => false,
        }
    }

    fn read(&self, path: &str) -> Result<Option<Vec<u8>>, TreeError> {
        let path = normalize_path(path)?;
        if let Some(content) = self.staged.get(&path) {
            return Ok(Some(content.clone()));
        }

        let host = self.host_path(&path);
        match fs::read(&host) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TreeError::Io {
                path: host.display().to_string(),
                source: e,
            }),
        }
    }

    fn create(&mut self, path: &str, content: Vec<u8>) -> Result<(), TreeError> {
        let path = normalize_path(path)?;
        if self.exists_normalized(&path) {
            return Err(TreeError::AlreadyExists(path));
        }
        record_action(&mut self.actions, ActionKind::Create, &path, content.len());
        self.staged.insert(path, content);
        Ok(())
    }

    fn overwrite(&mut self, path: &str, content: Vec<u8>) -> Result<(), TreeError> {
        let path = normalize_path(path)?;
        if !self.exists_normalized(&path) {
            return Err(TreeError::NotFound(path));
        }
        record_action(&mut self.actions, ActionKind::Update, &path, content.len());
        self.staged.insert(path, content);
        Ok(())
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_are_staged_until_commit() {
        let tmp = TempDir::new().unwrap();
        let mut tree = HostTree::new(tmp.path());

        tree.create("libs/ui/README.md", b"# Ui".to_vec()).unwrap();
        assert!(tree.exists("libs/ui/README.md"));
        assert!(!tmp.path().join("libs/ui/README.md").exists());
        assert_eq!(tree.pending(), 1);

        let written = tree.commit().unwrap();
        assert_eq!(written, 1);
        assert_eq!(tree.pending(), 0);
        assert_eq!(
            fs::read_to_string(tmp.path().join("libs/ui/README.md")).unwrap(),
            "# Ui"
        );
    }

    #[test]
    fn test_reads_fall_through_to_disk() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("nx.json"), "{}").unwrap();
        let tree = HostTree::new(tmp.path());

        assert!(tree.exists("nx.json"));
        assert_eq!(tree.read("nx.json").unwrap(), Some(b"{}".to_vec()));
        assert_eq!(tree.read("missing.json").unwrap(), None);
    }

    #[test]
    fn test_create_rejects_existing_disk_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("nx.json"), "{}").unwrap();
        let mut tree = HostTree::new(tmp.path());

        let err = tree.create("nx.json", b"{}".to_vec()).unwrap_err();
        assert!(matches!(err, TreeError::AlreadyExists(_)));
    }

    #[test]
    fn test_overwrite_replaces_disk_file_on_commit() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("nx.json"), "{}").unwrap();
        let mut tree = HostTree::new(tmp.path());

        tree.overwrite("nx.json", b"{\"npmScope\":\"example\"}".to_vec())
            .unwrap();
        assert_eq!(fs::read_to_string(tmp.path().join("nx.json")).unwrap(), "{}");

        tree.commit().unwrap();
        assert_eq!(
            fs::read_to_string(tmp.path().join("nx.json")).unwrap(),
            "{\"npmScope\":\"example\"}"
        );
        let leftovers: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_commit_leaves_similarly_named_files_alone() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".nx.json.tmp"), "keep").unwrap();
        let mut tree = HostTree::new(tmp.path());

        tree.create("nx.json", b"{}".to_vec()).unwrap();
        tree.commit().unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join(".nx.json.tmp")).unwrap(),
            "keep"
        );
        assert_eq!(fs::read_to_string(tmp.path().join("nx.json")).unwrap(), "{}");
    }

    #[test]
    fn test_failed_commit_keeps_unwritten_files_staged() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b"), "not a directory").unwrap();
        let mut tree = HostTree::new(tmp.path());

        tree.create("b/x.txt", b"x".to_vec()).unwrap();
        tree.create("c.txt", b"c".to_vec()).unwrap();
        assert_eq!(tree.pending(), 2);

        let err = tree.commit().unwrap_err();
        assert!(matches!(err, TreeError::Io { .. }));
        assert_eq!(tree.pending(), 2);

        fs::remove_file(tmp.path().join("b")).unwrap();
        assert_eq!(tree.commit().unwrap(), 2);
        assert_eq!(tree.pending(), 0);
        assert_eq!(fs::read_to_string(tmp.path().join("b/x.txt")).unwrap(), "x");
        assert_eq!(fs::read_to_string(tmp.path().join("c.txt")).unwrap(), "c");
    }

    #[test]
    fn test_overwrite_missing_fails() {
        let tmp = TempDir::new().unwrap();
        let mut tree = HostTree::new(tmp.path());
        let err = tree.overwrite("nx.json", Vec::new()).unwrap_err();
        assert!(matches!(err, TreeError::NotFound(_)));
    }
}
