//! Test utilities for extbuild-lib.
//!
//! Tests never need a real CMake: [`FakeCmake`] writes a shell script that
//! answers `--version` and records every other invocation to a log file.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// A stand-in `cmake` executable.
pub struct FakeCmake {
  pub program: PathBuf,
  pub log: PathBuf,
}

impl FakeCmake {
  /// Write a fake cmake reporting `version` into `dir`.
  ///
  /// `exit_code` is returned from configure calls when `fail_configure` is
  /// set, otherwise from build calls; 0 means every call succeeds.
  pub fn new(dir: &Path, version: &str, exit_code: i32, fail_configure: bool) -> Self {
    let (configure_code, build_code) = if fail_configure { (exit_code, 0) } else { (0, exit_code) };
    Self::write(dir, version, 0, configure_code, build_code)
  }

  /// A fake cmake that prints `version` but exits with `code` from `--version`.
  pub fn broken_version(dir: &Path, version: &str, code: i32) -> Self {
    Self::write(dir, version, code, 0, 0)
  }

  /// A fake cmake where every call succeeds.
  pub fn ok(dir: &Path) -> Self {
    Self::new(dir, "3.27.4", 0, false)
  }

  fn write(dir: &Path, version: &str, version_code: i32, configure_code: i32, build_code: i32) -> Self {
    let program = dir.join("cmake");
    let log = dir.join("cmake.log");

    let script = format!(
      r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "cmake version {version}"
  exit {version_code}
fi
printf '%s\n' "cwd=$(pwd)" >> "{log}"
printf '%s\n' "args=$*" >> "{log}"
printf '%s\n' "cxxflags=$CXXFLAGS" >> "{log}"
if [ "$1" = "--build" ]; then
  exit {build_code}
fi
exit {configure_code}
"#,
      log = log.display(),
    );
    fs::write(&program, script).unwrap();
    fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

    Self { program, log }
  }

  pub fn program_str(&self) -> &str {
    self.program.to_str().unwrap()
  }

  /// Lines recorded so far, empty if cmake was never invoked.
  pub fn log_lines(&self) -> Vec<String> {
    fs::read_to_string(&self.log)
      .map(|s| s.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }
}
