//! Shared helpers for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Directory holding the YAML fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Path to a fixture by file name.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Read a fixture into a string.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).expect("Failed to read fixture")
}

/// Copy a fixture into a fresh temp dir. Keep the `TempDir` alive while the
/// path is in use.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::copy(fixture(name), &path).expect("Failed to copy fixture");
    (temp_dir, path)
}
