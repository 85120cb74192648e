//! Paths into the checked-in `test-fixtures/` directory.

use std::path::PathBuf;

/// Path to the test-fixtures directory at the workspace root.
pub fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/mvc-test-utils -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures")
}

/// Classpath root holding the definition document fixtures.
pub fn classpath_root() -> PathBuf {
    fixtures_dir().join("classpath")
}

/// Web application root relative to the workspace root.
pub const WEB_RESOURCES_DIR: &str = "test-fixtures/classpath/META-INF/web-resources";
