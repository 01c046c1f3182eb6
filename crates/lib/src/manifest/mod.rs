//! Package manifest (`extbuild.toml`).
//!
//! The manifest names the package, its version and the native extensions to
//! compile. Relative source directories resolve against the directory that
//! holds the manifest.

mod types;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub use types::*;

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "extbuild.toml";

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse manifest: {0}")]
  Parse(#[from] toml::de::Error),

  #[error("manifest declares no extensions")]
  NoExtensions,

  #[error("manifest field `{0}` must not be empty")]
  EmptyField(&'static str),
}

impl Manifest {
  /// Parse a manifest from TOML text. Source directories stay as written.
  pub fn parse(content: &str) -> Result<Self, ManifestError> {
    let manifest: Manifest = toml::from_str(content)?;
    manifest.validate()?;
    Ok(manifest)
  }

  /// Load a manifest from disk and resolve its source directories.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let mut manifest = Self::parse(&content)?;

    let base = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let base = dunce::canonicalize(base).unwrap_or_else(|_| base.to_path_buf());
    manifest.resolve_sources(&base);

    debug!(path = %path.display(), extensions = manifest.extensions.len(), "loaded manifest");
    Ok(manifest)
  }

  /// Make every extension's source directory absolute relative to `base`.
  pub fn resolve_sources(&mut self, base: &Path) {
    for ext in &mut self.extensions {
      if ext.source_dir.is_relative() {
        let joined = base.join(&ext.source_dir);
        ext.source_dir = dunce::canonicalize(&joined).unwrap_or(joined);
      }
    }
  }

  fn validate(&self) -> Result<(), ManifestError> {
    if self.package.name.trim().is_empty() {
      return Err(ManifestError::EmptyField("package.name"));
    }
    if self.package.version.trim().is_empty() {
      return Err(ManifestError::EmptyField("package.version"));
    }
    if self.extensions.is_empty() {
      return Err(ManifestError::NoExtensions);
    }
    if self.extensions.iter().any(|e| e.name.trim().is_empty()) {
      return Err(ManifestError::EmptyField("extension.name"));
    }
    Ok(())
  }
}
