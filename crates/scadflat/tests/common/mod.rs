// crates/scadflat/tests/common/mod.rs

use std::fs;
use std::path::PathBuf;

use scadflat::{FlattenError, flatten_file};
use tempfile::TempDir;


pub use test_data::*;

pub struct TestSetup {
    pub temp_dir: TempDir,
}

impl TestSetup {
    pub fn new() -> Self {
        TestSetup {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Write `content` under the temp root, creating parent directories
    /// for nested names like "sub/mid.scad".
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn flatten(&self, name: &str) -> Result<String, FlattenError> {
        flatten_file(&self.temp_dir.path().join(name))
    }
}
