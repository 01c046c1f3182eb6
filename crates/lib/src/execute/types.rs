//! Error and report types for running builds.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::cmake::{CmakeError, CmakeInfo, describe_exit};
use crate::plan::PlanError;

/// Errors that abort a build. Nothing is retried.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// CMake is missing or too old.
  #[error(transparent)]
  Cmake(#[from] CmakeError),

  /// Arguments could not be derived.
  #[error(transparent)]
  Plan(#[from] PlanError),

  #[error("failed to create build directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to start {program}: {source}")]
  Spawn { program: String, source: std::io::Error },

  /// A child process exited unsuccessfully.
  #[error("command failed ({}): {program} {args}", describe_exit(*code))]
  CommandFailed {
    program: String,
    args: String,
    code: Option<i32>,
  },
}

/// Outcome of building one extension.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionReport {
  pub extension: String,
  pub output_dir: PathBuf,
  pub elapsed: Duration,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  pub cmake: CmakeInfo,
  pub extensions: Vec<ExtensionReport>,
}
