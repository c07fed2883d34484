//! Isolated HOME and XDG directories for binary-level tests
//!
//! Instead of mutating the test process environment, [`TestHome`] hands out
//! the variables a spawned `revdash` process should see.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary home directory with its own XDG config location
pub struct TestHome {
  temp_dir: TempDir,
}

impl Default for TestHome {
  fn default() -> Self {
    Self::new()
  }
}

impl TestHome {
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    fs::create_dir_all(temp_dir.path().join(".config")).expect("Failed to create config directory");
    Self { temp_dir }
  }

  /// Get the path to the temporary HOME directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the path to a file in the temporary HOME directory
  pub fn home_path(&self, relative_path: &str) -> PathBuf {
    self.temp_dir.path().join(relative_path)
  }

  /// Write a `.netrc` into the home directory
  pub fn write_netrc(&self, content: &str) {
    fs::write(self.home_path(".netrc"), content).expect("Failed to write test .netrc");
  }

  /// Environment variables pointing a child process at this home
  pub fn env_vars(&self) -> Vec<(&'static str, PathBuf)> {
    vec![
      ("HOME", self.home_dir().to_path_buf()),
      ("XDG_CONFIG_HOME", self.home_path(".config")),
    ]
  }
}
