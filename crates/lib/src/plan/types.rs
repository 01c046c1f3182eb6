use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::cmake::DEFAULT_PROGRAM;
use crate::platform::{CompilerKind, Os, default_plat_name};

#[derive(Debug, Error)]
pub enum PlanError {
  /// A Visual Studio generator needs `-A`, but the platform has no mapping.
  #[error("no CMake architecture known for platform `{plat_name}`")]
  UnsupportedPlatform { plat_name: String },

  #[error("failed to resolve {} to an absolute path: {source}", path.display())]
  ResolvePath { path: PathBuf, source: std::io::Error },
}

/// CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuildConfiguration {
  Debug,
  Release,
}

impl BuildConfiguration {
  pub fn from_debug(debug: bool) -> Self {
    if debug { Self::Debug } else { Self::Release }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
    }
  }

  /// Suffix used by per-configuration CMake variables (`..._RELEASE`).
  pub fn suffix(&self) -> &'static str {
    match self {
      Self::Debug => "DEBUG",
      Self::Release => "RELEASE",
    }
  }
}

impl fmt::Display for BuildConfiguration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Caller-controlled settings for a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOptions {
  /// Scratch directory for CMake build trees.
  pub build_temp: PathBuf,
  /// Root of the packaging output tree.
  pub build_lib: PathBuf,
  pub debug: bool,
  /// Job count passed to `cmake --build` as `-j<N>`.
  pub jobs: Option<usize>,
  /// Packaging-style platform name, e.g. `win-amd64`.
  pub plat_name: String,
  pub compiler: CompilerKind,
  /// The cmake program to run.
  pub cmake: String,
  /// Interpreter the bindings are built against, passed as `PYTHON_EXECUTABLE`.
  pub interpreter: Option<PathBuf>,
}

impl BuildOptions {
  /// Options for the current host with the given directories.
  pub fn for_host(build_temp: impl Into<PathBuf>, build_lib: impl Into<PathBuf>) -> Self {
    Self {
      build_temp: build_temp.into(),
      build_lib: build_lib.into(),
      debug: false,
      jobs: None,
      plat_name: default_plat_name().unwrap_or_default(),
      compiler: CompilerKind::default_for(Os::current()),
      cmake: DEFAULT_PROGRAM.to_string(),
      interpreter: None,
    }
  }

  pub fn configuration(&self) -> BuildConfiguration {
    BuildConfiguration::from_debug(self.debug)
  }
}

/// Everything needed to configure and build one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
  pub extension: String,
  pub source_dir: PathBuf,
  pub build_dir: PathBuf,
  pub output_dir: PathBuf,
  pub configuration: BuildConfiguration,
  /// Arguments following the source directory in the configure call.
  pub configure_args: Vec<String>,
  /// Arguments following `--build .` in the build call.
  pub build_args: Vec<String>,
  /// Variables set for the configure call only.
  pub configure_env: BTreeMap<String, String>,
}

impl BuildPlan {
  /// Full argument list of the configure call, without the program.
  pub fn configure_command(&self) -> Vec<String> {
    let mut args = vec![self.source_dir.display().to_string()];
    args.extend(self.configure_args.iter().cloned());
    args
  }

  /// Full argument list of the build call, without the program.
  pub fn build_command(&self) -> Vec<String> {
    let mut args = vec!["--build".to_string(), ".".to_string()];
    args.extend(self.build_args.iter().cloned());
    args
  }
}
