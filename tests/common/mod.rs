#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub use wcc_test_utils::builders;
pub use wcc_test_utils::fakes;
pub use wcc_test_utils::init_tracing;
pub use wcc_test_utils::patch;

/// Write `contents` to `dir/name` and return the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write test file");
    path
}
