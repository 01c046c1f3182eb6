//! Derivation of CMake invocations.
//!
//! Turns a manifest extension, the caller's [`BuildOptions`] and a
//! [`BuildEnv`] snapshot into a [`BuildPlan`]. Nothing here touches the
//! filesystem or spawns processes.
//!
//! Argument order:
//! 1. output directory, interpreter and build type
//! 2. generator and architecture selection
//! 3. `CMAKE_ARGS` and compiler overrides
//! 4. `CMAKE_OSX_ARCHITECTURES` for ARM targets

mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{self, BuildEnv};
use crate::manifest::{Extension, Manifest};
use crate::platform::{CompilerKind, cmake_arch};

pub use types::*;

/// Generator used for non-MSVC builds when `CMAKE_GENERATOR` is unset.
pub const DEFAULT_GENERATOR: &str = "Ninja";

/// Generator name fragments that mark a single-configuration generator.
const SINGLE_CONFIG_MARKERS: &[&str] = &["NMake", "Ninja"];

/// Generator name fragments that already select an architecture.
const ARCH_MARKERS: &[&str] = &["ARM", "Win64"];

/// Plan every extension in the manifest, in manifest order.
pub fn plan_all(manifest: &Manifest, options: &BuildOptions, env: &BuildEnv) -> Result<Vec<BuildPlan>, PlanError> {
  manifest
    .extensions
    .iter()
    .map(|ext| plan_extension(manifest, ext, options, env))
    .collect()
}

/// Derive the configure and build invocations for one extension.
pub fn plan_extension(
  manifest: &Manifest,
  ext: &Extension,
  options: &BuildOptions,
  env: &BuildEnv,
) -> Result<BuildPlan, PlanError> {
  let cfg = options.configuration();
  let output_dir = output_dir(&options.build_lib, &ext.name, manifest.package_dir())?;
  let out = output_dir.display().to_string();

  let mut configure_args = vec![format!("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY={}", out)];
  if let Some(interpreter) = &options.interpreter {
    configure_args.push(format!("-DPYTHON_EXECUTABLE={}", interpreter.display()));
  }
  configure_args.push(format!("-DCMAKE_BUILD_TYPE={}", cfg));

  let mut build_args = Vec::new();

  generator_args(options, env, &out, &mut configure_args, &mut build_args)?;
  configure_args.extend(compiler_args(env));

  if let Some(jobs) = parallel_arg(options.jobs, env) {
    build_args.push(jobs);
  }

  if let Some(target_platform) = env.get(env::TARGET_PLATFORM) {
    info!(target_platform, "target platform");
  }
  if env.targets_arm() {
    configure_args.push("-DCMAKE_OSX_ARCHITECTURES=arm64".to_string());
  }

  let mut configure_env = BTreeMap::new();
  configure_env.insert(
    env::CXXFLAGS.to_string(),
    version_cxxflags(env.get(env::CXXFLAGS), &manifest.package.version),
  );

  let plan = BuildPlan {
    extension: ext.name.clone(),
    source_dir: absolute(&ext.source_dir)?,
    build_dir: absolute(&options.build_temp)?.join(&ext.name),
    output_dir,
    configuration: cfg,
    configure_args,
    build_args,
    configure_env,
  };

  debug!(
    extension = %plan.extension,
    configure = ?plan.configure_args,
    build = ?plan.build_args,
    "derived cmake arguments"
  );

  Ok(plan)
}

/// Directory the extension's artifacts are written to.
///
/// This is the directory the extension module would be installed into
/// (the parent packages of a dotted name under `build_lib`), plus the
/// package subdirectory.
pub fn output_dir(build_lib: &Path, ext_name: &str, package_dir: &str) -> Result<PathBuf, PlanError> {
  let mut dir = absolute(build_lib)?;
  let mut parts: Vec<&str> = ext_name.split('.').collect();
  parts.pop();
  for part in parts {
    dir.push(part);
  }
  Ok(dir.join(package_dir))
}

/// Generator, architecture and per-configuration output arguments.
fn generator_args(
  options: &BuildOptions,
  env: &BuildEnv,
  out: &str,
  configure_args: &mut Vec<String>,
  build_args: &mut Vec<String>,
) -> Result<(), PlanError> {
  let generator = env.generator();

  match options.compiler {
    CompilerKind::Unix => {
      if generator.is_empty() {
        configure_args.push(format!("-G{}", DEFAULT_GENERATOR));
      }
    }
    CompilerKind::Msvc => {
      let single_config = is_single_config(generator);
      let contains_arch = ARCH_MARKERS.iter().any(|m| generator.contains(m));

      if !single_config && !contains_arch {
        let arch = cmake_arch(&options.plat_name).ok_or_else(|| PlanError::UnsupportedPlatform {
          plat_name: options.plat_name.clone(),
        })?;
        configure_args.push("-A".to_string());
        configure_args.push(arch.to_string());
      }

      if !single_config {
        let cfg = options.configuration();
        for kind in ["ARCHIVE", "LIBRARY", "RUNTIME"] {
          configure_args.push(format!("-DCMAKE_{}_OUTPUT_DIRECTORY_{}={}", kind, cfg.suffix(), out));
        }
        build_args.push("--config".to_string());
        build_args.push(cfg.to_string());
      }
    }
  }

  Ok(())
}

/// Whether the generator builds one configuration chosen at configure time.
pub fn is_single_config(generator: &str) -> bool {
  SINGLE_CONFIG_MARKERS.iter().any(|m| generator.contains(m))
}

/// `CMAKE_ARGS` and compiler selection.
///
/// Apple arm64 cross toolchains (recognised by their archiver) take the
/// compilers from `CC`/`CXX` along with `CMAKE_ARGS`; every other build uses
/// the `*_FOR_BUILD` compilers.
fn compiler_args(env: &BuildEnv) -> Vec<String> {
  let mut args = Vec::new();

  if env.is_apple_arm_cross() {
    args.extend(env.extra_cmake_args());

    let cc = env.get(env::CC);
    info!(compiler = cc.unwrap_or_default(), "C compiler");
    if let Some(cc) = cc {
      args.push(format!("-DCMAKE_C_COMPILER={}", cc));
    }

    let cxx = env.get(env::CXX);
    info!(compiler = cxx.unwrap_or_default(), "CXX compiler");
    if let Some(cxx) = cxx {
      args.push(format!("-DCMAKE_CXX_COMPILER={}", cxx));
    }
  } else {
    if let Some(cc) = env.get(env::CC_FOR_BUILD) {
      info!(compiler = cc, "Setting C compiler");
      args.push(format!("-DCMAKE_C_COMPILER={}", cc));
    }
    if let Some(cxx) = env.get(env::CXX_FOR_BUILD) {
      info!(compiler = cxx, "Setting CXX compiler");
      args.push(format!("-DCMAKE_CXX_COMPILER={}", cxx));
    }
  }

  args
}

/// `-j<N>` unless `CMAKE_BUILD_PARALLEL_LEVEL` already controls parallelism.
fn parallel_arg(jobs: Option<usize>, env: &BuildEnv) -> Option<String> {
  if env.has_parallel_override() {
    return None;
  }
  jobs.filter(|n| *n > 0).map(|n| format!("-j{}", n))
}

/// `CXXFLAGS` for the configure step, embedding the package version.
pub fn version_cxxflags(existing: Option<&str>, version: &str) -> String {
  format!("{} -DVERSION_INFO=\\\"{}\\\"", existing.unwrap_or_default(), version)
}

/// Make `path` absolute against the working directory. An empty path
/// means the working directory itself.
fn absolute(path: &Path) -> Result<PathBuf, PlanError> {
  let path = if path.as_os_str().is_empty() { Path::new(".") } else { path };
  std::path::absolute(path).map_err(|source| PlanError::ResolvePath {
    path: path.to_path_buf(),
    source,
  })
}
