//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with an isolated home directory
//! - Command builder helpers for common patterns
//! - Test data fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads; removed from every test command.
const SEATLINE_ENV_VARS: &[&str] = &[
    "SEATLINE_CONFIG",
    "SEATLINE_LOG_MODE",
    "SEATLINE_ROUTES",
    "SEATLINE_COACHES",
    "SEATLINE_SEATS",
    "SEATLINE_STATIONS",
    "SEATLINE_THREADS",
    "SEATLINE_OPS",
    "SEATLINE_SEED",
    "SEATLINE_ENGINE",
];

/// A small layout and workload that runs in milliseconds.
pub const SMALL_CONFIG: &str = "\
layout:
  routes: 2
  coaches: 2
  seats: 10
  stations: 6
bench:
  threads: 2
  ops_per_thread: 200
  seed: 7
";

/// Test environment with an isolated home directory.
///
/// `HOME` points into the temporary directory, so no user configuration
/// leaks into the tests.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder with `HOME` redirected and seatline variables cleared.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("seatline").expect("Failed to find seatline binary");
        cmd.env("HOME", &self.temp_path);
        for var in SEATLINE_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder that reads `config` through `--config`.
    pub fn command_with_config(&self, config: &Path) -> Command {
        let mut cmd = self.command();
        cmd.arg("--config").arg(config);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temporary directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write [`SMALL_CONFIG`] and return its path.
    pub fn small_config(&self) -> PathBuf {
        self.write_file("config.yaml", SMALL_CONFIG)
    }

    /// Install `contents` as the user configuration file.
    pub fn write_user_config(&self, contents: &str) -> PathBuf {
        let dir = self.temp_path.join(".seatline");
        std::fs::create_dir_all(&dir).expect("Failed to create user config dir");
        let path = dir.join("config.yaml");
        std::fs::write(&path, contents).expect("Failed to write user config");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
