//! Tests for `extbuild plan`.

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn plan_unix_uses_ninja() {
  let env = TestEnv::igl();

  env
    .extbuild()
    .args(["plan", "--compiler", "unix", "--python", "/usr/bin/python3"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Package: igl 2022.2.0"))
    .stdout(predicate::str::contains("-DPYTHON_EXECUTABLE=/usr/bin/python3"))
    .stdout(predicate::str::contains("-DCMAKE_BUILD_TYPE=Release"))
    .stdout(predicate::str::contains("-GNinja"))
    .stdout(predicate::str::contains("build/lib/igl"))
    .stdout(predicate::str::contains("--build ."));
}

#[test]
#[serial]
fn plan_generator_override_drops_ninja() {
  let env = TestEnv::igl();

  env
    .extbuild()
    .args(["plan", "--compiler", "unix"])
    .env("CMAKE_GENERATOR", "Unix Makefiles")
    .assert()
    .success()
    .stdout(predicate::str::contains("-GNinja").not());
}

#[test]
#[serial]
fn plan_msvc_selects_architecture() {
  let env = TestEnv::igl();

  env
    .extbuild()
    .args(["plan", "--compiler", "msvc", "--plat-name", "win-arm64", "--debug"])
    .assert()
    .success()
    .stdout(predicate::str::contains("-A ARM64"))
    .stdout(predicate::str::contains("CMAKE_RUNTIME_OUTPUT_DIRECTORY_DEBUG="))
    .stdout(predicate::str::contains("--build . --config Debug"));
}

#[test]
#[serial]
fn plan_msvc_unknown_platform_fails() {
  let env = TestEnv::igl();

  env
    .extbuild()
    .args(["plan", "--compiler", "msvc", "--plat-name", "linux-x86_64"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no CMake architecture known for platform `linux-x86_64`"));
}

#[test]
#[serial]
fn plan_jobs_and_parallel_override() {
  let env = TestEnv::igl();

  env
    .extbuild()
    .args(["plan", "--compiler", "unix", "-j", "5"])
    .assert()
    .success()
    .stdout(predicate::str::contains("--build . -j5"));

  env
    .extbuild()
    .args(["plan", "--compiler", "unix", "-j", "5"])
    .env("CMAKE_BUILD_PARALLEL_LEVEL", "3")
    .assert()
    .success()
    .stdout(predicate::str::contains("-j5").not());
}

#[test]
#[serial]
fn plan_apple_cross_compilers() {
  let env = TestEnv::igl();

  env
    .extbuild()
    .args(["plan", "--compiler", "unix"])
    .env("AR", "arm64-apple-darwin20.0.0-ar")
    .env("CC", "arm64-apple-darwin20.0.0-clang")
    .env("CC_FOR_BUILD", "x86_64-apple-darwin13.4.0-clang")
    .env("target_platform", "osx-arm64")
    .assert()
    .success()
    .stdout(predicate::str::contains("-DCMAKE_C_COMPILER=arm64-apple-darwin20.0.0-clang"))
    .stdout(predicate::str::contains("x86_64-apple-darwin13.4.0-clang").not())
    .stdout(predicate::str::contains("-DCMAKE_OSX_ARCHITECTURES=arm64"));
}

#[test]
#[serial]
fn plan_json_output() {
  let env = TestEnv::igl();

  let output = env
    .extbuild()
    .args(["plan", "--compiler", "unix", "--output", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let plans: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(plans[0]["extension"], "pyigl");
  assert_eq!(plans[0]["configuration"], "Release");
  assert_eq!(
    plans[0]["configure_env"]["CXXFLAGS"],
    " -DVERSION_INFO=\\\"2022.2.0\\\""
  );
}

#[test]
#[serial]
fn plan_missing_manifest_fails() {
  let env = TestEnv::igl();

  env
    .extbuild()
    .args(["plan", "missing.toml"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load manifest"));
}
