use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Package metadata shared by every extension in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDef {
  pub name: String,
  pub version: String,
  /// Subdirectory of the packaging output tree receiving the artifacts.
  /// Defaults to the package name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub package_dir: Option<String>,
}

/// A native extension module compiled by CMake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
  /// Importable module name, possibly dotted (`pkg.sub.module`).
  pub name: String,
  /// Directory holding the top-level `CMakeLists.txt`.
  #[serde(default)]
  pub source_dir: PathBuf,
}

impl Extension {
  pub fn new(name: impl Into<String>, source_dir: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      source_dir: source_dir.into(),
    }
  }
}

/// The parsed `extbuild.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
  pub package: PackageDef,
  #[serde(default, rename = "extension")]
  pub extensions: Vec<Extension>,
}

impl Manifest {
  /// Name of the output subdirectory artifacts land in.
  pub fn package_dir(&self) -> &str {
    self.package.package_dir.as_deref().unwrap_or(&self.package.name)
  }

  /// Comma separated extension names, used in error messages.
  pub fn extension_names(&self) -> String {
    self
      .extensions
      .iter()
      .map(|e| e.name.as_str())
      .collect::<Vec<_>>()
      .join(", ")
  }
}
