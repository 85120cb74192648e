//! [`TestResources`]: a temporary classpath root for test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory used as classpath root or web application root.
///
/// # Example
///
/// ```rust,no_run
/// use mvc_test_utils::resources::TestResources;
///
/// let resources = TestResources::new();
/// resources.write("org/app/context.toml", "[[components]]\nname = \"a\"\nvalue = 1\n");
/// resources.assert_file_exists("org/app/context.toml");
/// ```
pub struct TestResources {
    temp_dir: TempDir,
}

impl Default for TestResources {
    fn default() -> Self {
        Self::new()
    }
}

impl TestResources {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `path` (relative to the root), creating parent
    /// directories. Returns the full path.
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {}", full_path.display(), e));
        full_path
    }

    /// Location of `path` below this root using the `file:` prefix.
    pub fn file_location(&self, path: &str) -> String {
        format!("file:{}", self.root().join(path).display())
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
