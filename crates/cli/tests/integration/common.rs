//! Shared test helpers for CLI integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Variables that would leak the host's toolchain into a test run.
const TOOLCHAIN_VARS: &[&str] = &[
  "CMAKE_GENERATOR",
  "AR",
  "CMAKE_ARGS",
  "CC",
  "CXX",
  "CC_FOR_BUILD",
  "CXX_FOR_BUILD",
  "target_platform",
  "CMAKE_BUILD_PARALLEL_LEVEL",
  "CXXFLAGS",
  "EXTBUILD_CMAKE",
];

/// Manifest for a single `pyigl` extension in the test directory.
pub const IGL_MANIFEST: &str = r#"
[package]
name = "igl"
version = "2022.2.0"

[[extension]]
name = "pyigl"
source_dir = "native"
"#;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the manifest, a
/// source directory, a fake `cmake` and the build output.
pub struct TestEnv {
  pub temp: TempDir,
  pub manifest_path: PathBuf,
}

impl TestEnv {
  /// Create an environment around the given manifest content.
  pub fn with_manifest(content: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let manifest_path = temp.path().join("extbuild.toml");
    fs::write(&manifest_path, content).unwrap();
    fs::create_dir_all(temp.path().join("native")).unwrap();
    Self { temp, manifest_path }
  }

  pub fn igl() -> Self {
    Self::with_manifest(IGL_MANIFEST)
  }

  /// Write a fake cmake that reports `version` and exits with
  /// `build_exit` from `--build` calls.
  pub fn fake_cmake(&self, version: &str, build_exit: i32) -> PathBuf {
    let program = self.temp.path().join("cmake");
    let script = format!(
      r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "cmake version {version}"
  exit 0
fi
printf '%s\n' "args=$*" >> "{log}"
if [ "$1" = "--build" ]; then
  exit {build_exit}
fi
exit 0
"#,
      log = self.log_path().display(),
    );
    fs::write(&program, script).unwrap();
    fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();
    program
  }

  pub fn log_path(&self) -> PathBuf {
    self.temp.path().join("cmake.log")
  }

  pub fn log(&self) -> String {
    fs::read_to_string(self.log_path()).unwrap_or_default()
  }

  /// Get a pre-configured Command for the extbuild binary.
  ///
  /// Runs inside the temp directory with toolchain variables cleared so
  /// derived arguments only depend on the flags under test.
  pub fn extbuild(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("extbuild");
    cmd.current_dir(self.temp.path());
    for var in TOOLCHAIN_VARS {
      cmd.env_remove(var);
    }
    cmd
  }
}
