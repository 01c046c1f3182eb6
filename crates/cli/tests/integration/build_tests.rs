//! Tests for `extbuild build`.

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn build_runs_configure_and_build() {
  let env = TestEnv::igl();
  let cmake = env.fake_cmake("3.27.4", 0);

  env
    .extbuild()
    .args(["build", "--compiler", "unix", "-j", "2", "--cmake"])
    .arg(&cmake)
    .assert()
    .success()
    .stdout(predicate::str::contains("Building igl 2022.2.0 (Release)"))
    .stdout(predicate::str::contains("pyigl"))
    .stdout(predicate::str::contains("Build complete!"));

  let log = env.log();
  let lines: Vec<_> = log.lines().collect();
  assert_eq!(lines.len(), 2, "unexpected calls: {}", log);
  assert!(lines[0].contains("native -DCMAKE_LIBRARY_OUTPUT_DIRECTORY="));
  assert!(lines[0].ends_with("-GNinja"));
  assert_eq!(lines[1], "args=--build . -j2");

  assert!(env.temp.path().join("build").join("temp").join("pyigl").is_dir());
}

#[test]
#[serial]
fn build_reads_cmake_from_env() {
  let env = TestEnv::igl();
  let cmake = env.fake_cmake("3.27.4", 0);

  env
    .extbuild()
    .args(["build", "--compiler", "unix"])
    .env("EXTBUILD_CMAKE", &cmake)
    .assert()
    .success();

  assert_eq!(env.log().lines().count(), 2);
}

#[test]
#[serial]
fn build_failure_exits_nonzero() {
  let env = TestEnv::igl();
  let cmake = env.fake_cmake("3.27.4", 3);

  env
    .extbuild()
    .args(["build", "--compiler", "unix", "--cmake"])
    .arg(&cmake)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Build failed"))
    .stderr(predicate::str::contains("command failed (exit code 3)"));
}

#[test]
#[serial]
fn build_with_old_cmake_fails_early() {
  let env = TestEnv::igl();
  let cmake = env.fake_cmake("3.1.0", 0);

  env
    .extbuild()
    .args(["build", "--compiler", "unix", "--cmake"])
    .arg(&cmake)
    .assert()
    .failure()
    .stderr(predicate::str::contains("CMake >= 3.2.0 is required, found 3.1.0"));

  assert!(env.log().is_empty());
  assert!(!env.temp.path().join("build").exists());
}

#[test]
#[serial]
fn build_without_cmake_names_extensions() {
  let env = TestEnv::igl();

  env
    .extbuild()
    .args(["build", "--cmake", "/nonexistent/cmake"])
    .assert()
    .failure()
    .stderr(predicate::str::contains(
      "CMake must be installed to build the following extensions: pyigl",
    ));
}
