mod build;
mod info;
mod plan;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use extbuild_lib::cmake::DEFAULT_PROGRAM;
use extbuild_lib::env::EXTBUILD_CMAKE;
use extbuild_lib::manifest::MANIFEST_FILE;
use extbuild_lib::platform::{CompilerKind, find_interpreter};
use extbuild_lib::{BuildOptions, Manifest};

pub use build::cmd_build;
pub use info::cmd_info;
pub use plan::cmd_plan;

/// Options shared by `build` and `plan`.
#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Path to the manifest
  #[arg(default_value = MANIFEST_FILE)]
  pub manifest: PathBuf,

  /// Build the Debug configuration instead of Release
  #[arg(long)]
  pub debug: bool,

  /// Number of parallel build jobs
  #[arg(short, long)]
  pub jobs: Option<usize>,

  /// Directory for CMake build trees
  #[arg(long, default_value = "build/temp")]
  pub build_temp: PathBuf,

  /// Root of the packaging output tree
  #[arg(long, default_value = "build/lib")]
  pub build_lib: PathBuf,

  /// Platform name used to pick the generator architecture (e.g. win-amd64)
  #[arg(long)]
  pub plat_name: Option<String>,

  /// Compiler family (msvc or unix); defaults to the host's
  #[arg(long)]
  pub compiler: Option<CompilerKind>,

  /// CMake executable to run
  #[arg(long, env = EXTBUILD_CMAKE, default_value = DEFAULT_PROGRAM)]
  pub cmake: String,

  /// Interpreter passed to CMake as PYTHON_EXECUTABLE
  #[arg(long)]
  pub python: Option<PathBuf>,
}

impl BuildArgs {
  /// Load the manifest and turn the flags into build options.
  pub fn resolve(&self) -> Result<(Manifest, BuildOptions)> {
    let manifest = Manifest::load(&self.manifest)
      .with_context(|| format!("Failed to load manifest: {}", self.manifest.display()))?;

    let mut options = BuildOptions::for_host(&self.build_temp, &self.build_lib);
    options.debug = self.debug;
    options.jobs = self.jobs;
    options.cmake = self.cmake.clone();
    options.interpreter = self.python.clone().or_else(find_interpreter);
    if let Some(plat_name) = &self.plat_name {
      options.plat_name = plat_name.clone();
    }
    if let Some(compiler) = self.compiler {
      options.compiler = compiler;
    }

    Ok((manifest, options))
  }
}
