//! Snapshot of the environment variables that steer a native build.
//!
//! The process environment is read once into a [`BuildEnv`]; everything
//! downstream derives arguments from the snapshot so that derivation stays
//! pure and testable.

use std::collections::BTreeMap;

use serde::Serialize;

pub const CMAKE_GENERATOR: &str = "CMAKE_GENERATOR";
pub const AR: &str = "AR";
pub const CMAKE_ARGS: &str = "CMAKE_ARGS";
pub const CC: &str = "CC";
pub const CXX: &str = "CXX";
pub const CC_FOR_BUILD: &str = "CC_FOR_BUILD";
pub const CXX_FOR_BUILD: &str = "CXX_FOR_BUILD";
pub const TARGET_PLATFORM: &str = "target_platform";
pub const CMAKE_BUILD_PARALLEL_LEVEL: &str = "CMAKE_BUILD_PARALLEL_LEVEL";
pub const CXXFLAGS: &str = "CXXFLAGS";

/// Overrides the cmake program extbuild runs.
pub const EXTBUILD_CMAKE: &str = "EXTBUILD_CMAKE";

/// Archiver marker identifying an Apple arm64 cross toolchain.
const APPLE_ARM_MARKER: &str = "arm64-apple";

const TRACKED: &[&str] = &[
  CMAKE_GENERATOR,
  AR,
  CMAKE_ARGS,
  CC,
  CXX,
  CC_FOR_BUILD,
  CXX_FOR_BUILD,
  TARGET_PLATFORM,
  CMAKE_BUILD_PARALLEL_LEVEL,
  CXXFLAGS,
];

/// The build-relevant subset of an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildEnv {
  vars: BTreeMap<String, String>,
}

impl BuildEnv {
  /// Capture the tracked variables from the current process environment.
  pub fn from_process() -> Self {
    Self::from_vars(
      TRACKED
        .iter()
        .filter_map(|name| std::env::var(name).ok().map(|value| (name.to_string(), value))),
    )
  }

  /// Build a snapshot from explicit pairs. Untracked names are ignored.
  pub fn from_vars<I, K, V>(vars: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let vars = vars
      .into_iter()
      .map(|(k, v)| (k.into(), v.into()))
      .filter(|(k, _)| TRACKED.contains(&k.as_str()))
      .collect();
    Self { vars }
  }

  /// Returns the value of a variable, treating an empty value as unset.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.vars.get(name).map(String::as_str).filter(|v| !v.is_empty())
  }

  /// Whether the variable is present at all, even if empty.
  pub fn is_present(&self, name: &str) -> bool {
    self.vars.contains_key(name)
  }

  /// The generator requested through `CMAKE_GENERATOR`, or `""`.
  pub fn generator(&self) -> &str {
    self.get(CMAKE_GENERATOR).unwrap_or("")
  }

  /// `AR` names an Apple arm64 cross archiver.
  pub fn is_apple_arm_cross(&self) -> bool {
    self.get(AR).is_some_and(|ar| ar.contains(APPLE_ARM_MARKER))
  }

  /// `target_platform` names an ARM target.
  pub fn targets_arm(&self) -> bool {
    self.get(TARGET_PLATFORM).is_some_and(|p| p.contains("arm"))
  }

  /// Extra CMake arguments from `CMAKE_ARGS`, split on single spaces.
  pub fn extra_cmake_args(&self) -> Vec<String> {
    self
      .get(CMAKE_ARGS)
      .map(|args| {
        args
          .split(' ')
          .filter(|arg| !arg.is_empty())
          .map(str::to_string)
          .collect()
      })
      .unwrap_or_default()
  }

  /// `CMAKE_BUILD_PARALLEL_LEVEL` is set, so cmake picks the job count itself.
  pub fn has_parallel_override(&self) -> bool {
    self.is_present(CMAKE_BUILD_PARALLEL_LEVEL)
  }
}
