//! Host platform detection and the platform lookup tables used to pick
//! generator arguments.

pub mod arch;
pub mod os;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

pub use arch::Arch;
pub use os::Os;

/// Platform names that need an explicit `-A <arch>` with Visual Studio
/// generators, mapped to the value CMake expects.
pub const PLAT_TO_CMAKE: &[(&str, &str)] = &[
  ("win32", "Win32"),
  ("win-amd64", "x64"),
  ("win-arm32", "ARM"),
  ("win-arm64", "ARM64"),
];

/// Look up the CMake `-A` value for a platform name.
///
/// Returns `None` if the platform is not in [`PLAT_TO_CMAKE`].
pub fn cmake_arch(plat_name: &str) -> Option<&'static str> {
  PLAT_TO_CMAKE
    .iter()
    .find(|(plat, _)| *plat == plat_name)
    .map(|(_, arch)| *arch)
}

/// Architecture and OS of a build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// The host platform, or `None` if either half is unknown.
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  /// `<arch>-<os>`, e.g. `aarch64-darwin`.
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }

  /// Packaging platform name. Windows names match the keys of [`PLAT_TO_CMAKE`].
  pub fn plat_name(&self) -> String {
    self.os.plat_name(self.arch)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

/// Returns the packaging-style platform name for the current system
pub fn default_plat_name() -> Option<String> {
  Platform::current().map(|p| p.plat_name())
}

/// Find the interpreter the bindings target on `PATH`.
pub fn find_interpreter() -> Option<PathBuf> {
  ["python3", "python"].iter().find_map(|name| which::which(name).ok())
}

/// Compiler family driving the native build.
///
/// MSVC builds go through Visual Studio or NMake generators, everything
/// else defaults to Ninja.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerKind {
  Msvc,
  Unix,
}

impl CompilerKind {
  /// The compiler family a given host uses unless told otherwise
  pub fn default_for(os: Option<Os>) -> Self {
    match os {
      Some(Os::Windows) => Self::Msvc,
      _ => Self::Unix,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Msvc => "msvc",
      Self::Unix => "unix",
    }
  }
}

impl fmt::Display for CompilerKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for CompilerKind {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "msvc" => Ok(Self::Msvc),
      "unix" => Ok(Self::Unix),
      other => Err(format!("unknown compiler kind: {} (expected msvc or unix)", other)),
    }
  }
}
