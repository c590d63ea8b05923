use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Workspace root, one level above this crate's manifest.
fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("common crate lives inside the workspace")
}

/// Directory collecting images and other artifacts written by tests.
pub fn test_output_dir() -> PathBuf {
    static INIT: OnceLock<PathBuf> = OnceLock::new();
    INIT.get_or_init(|| {
        let dir = workspace_root().join("test_output");
        std::fs::create_dir_all(&dir).expect("Failed to create test_output directory");
        dir
    })
    .clone()
}

/// Returns the path to a test output file.
pub fn test_output_path(name: &str) -> PathBuf {
    test_output_dir().join(name)
}
