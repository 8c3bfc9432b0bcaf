//! # Test Workspace
//!
//! Wraps a temporary directory that is removed when the workspace is dropped.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Temporary directory holding the files of one test.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates an empty workspace and installs the test subscriber.
    pub fn new() -> Self {
        super::logging::init();
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Path of `name` inside the workspace.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes `contents` to `name` and returns its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Reads `name` back as text.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap()
    }

    /// Whether `name` exists.
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
