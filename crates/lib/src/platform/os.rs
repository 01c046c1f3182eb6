use std::fmt;

use super::Arch;

/// Host operating systems extensions are built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  pub fn current() -> Option<Self> {
    if cfg!(target_os = "windows") {
      Some(Self::Windows)
    } else if cfg!(target_os = "macos") {
      Some(Self::MacOs)
    } else if cfg!(target_os = "linux") {
      Some(Self::Linux)
    } else {
      None
    }
  }

  /// OS component of a platform triple (`x86_64-linux`, `aarch64-darwin`).
  pub fn triple_name(self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  /// Prefix of packaging platform names: `linux-x86_64`, `macosx-arm64`, `win-amd64`.
  pub fn plat_prefix(self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "macosx",
      Self::Windows => "win",
    }
  }

  /// Packaging platform name for `arch` on this OS.
  ///
  /// Windows uses its own architecture spellings, and 32-bit x86 is the
  /// bare `win32`.
  pub fn plat_name(self, arch: Arch) -> String {
    let arch = match (self, arch) {
      (Self::Windows, Arch::X86) => return "win32".to_string(),
      (Self::Windows, Arch::X86_64) => "amd64",
      (Self::Windows, Arch::Arm) => "arm32",
      (Self::Windows, Arch::Aarch64) => "arm64",
      (_, arch) => arch.as_str(),
    };
    format!("{}-{}", self.plat_prefix(), arch)
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.triple_name())
  }
}
