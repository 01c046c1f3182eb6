//! Locating the CMake executable and checking its version.

use std::path::PathBuf;
use std::process::Command;

use semver::Version;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Oldest CMake release the generated build files are known to work with.
pub const MINIMUM_VERSION: Version = Version::new(3, 2, 0);

/// Program name used when nothing overrides it.
pub const DEFAULT_PROGRAM: &str = "cmake";

#[derive(Debug, Error)]
pub enum CmakeError {
  #[error("CMake must be installed to build the following extensions: {extensions}")]
  NotInstalled {
    extensions: String,
    #[source]
    source: std::io::Error,
  },

  #[error("`{program} --version` failed ({})", describe_exit(*code))]
  VersionQueryFailed { program: String, code: Option<i32> },

  #[error("could not read a version from `{program} --version` output: {output}")]
  UnparseableVersion { program: String, output: String },

  #[error("CMake >= {minimum} is required, found {found}")]
  TooOld { found: Version, minimum: Version },
}

/// A CMake installation that passed the version check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmakeInfo {
  pub program: String,
  pub version: Version,
}

/// Resolve the program to a full path through `PATH`, if possible.
pub fn locate(program: &str) -> Option<PathBuf> {
  which::which(program).ok()
}

/// Run `<program> --version` and validate the reported version.
///
/// `extensions` names the extensions that need CMake and is only used for
/// the error message when the program cannot be started.
pub fn probe(program: &str, extensions: &str) -> Result<CmakeInfo, CmakeError> {
  debug!(program = %program, "probing cmake version");

  let output = Command::new(program)
    .arg("--version")
    .output()
    .map_err(|source| CmakeError::NotInstalled {
      extensions: extensions.to_string(),
      source,
    })?;

  if !output.status.success() {
    return Err(CmakeError::VersionQueryFailed {
      program: program.to_string(),
      code: output.status.code(),
    });
  }

  let stdout = String::from_utf8_lossy(&output.stdout);
  let version = parse_version(&stdout).ok_or_else(|| CmakeError::UnparseableVersion {
    program: program.to_string(),
    output: stdout.trim().to_string(),
  })?;

  check_version(&version)?;
  info!(program = %program, version = %version, "found cmake");

  Ok(CmakeInfo {
    program: program.to_string(),
    version,
  })
}

/// Fails if `version` is older than [`MINIMUM_VERSION`].
pub fn check_version(version: &Version) -> Result<(), CmakeError> {
  if *version < MINIMUM_VERSION {
    return Err(CmakeError::TooOld {
      found: version.clone(),
      minimum: MINIMUM_VERSION,
    });
  }
  Ok(())
}

/// Extract the version number following the word `version`.
///
/// Occurrences of `version` not followed by a number are skipped. Missing
/// minor or patch components count as zero, extra components are ignored.
pub fn parse_version(output: &str) -> Option<Version> {
  output
    .match_indices("version")
    .find_map(|(idx, word)| version_at(&output[idx + word.len()..]))
}

/// Render an exit code for error messages.
pub(crate) fn describe_exit(code: Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {}", code),
    None => "terminated by signal".to_string(),
  }
}

fn version_at(text: &str) -> Option<Version> {
  let rest = text.trim_start();
  let end = rest
    .find(|c: char| !(c.is_ascii_digit() || c == '.'))
    .unwrap_or(rest.len());

  let mut parts = rest[..end].split('.').filter(|p| !p.is_empty()).map(str::parse::<u64>);
  let major = parts.next()?.ok()?;
  let minor = parts.next().transpose().ok()?.unwrap_or(0);
  let patch = parts.next().transpose().ok()?.unwrap_or(0);

  Some(Version::new(major, minor, patch))
}
