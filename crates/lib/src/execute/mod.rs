//! Running the configure and build steps.
//!
//! Every extension is configured with `cmake <source> <args>` and then built
//! with `cmake --build . <args>`, both inside the extension's build
//! directory. Calls block until the child exits; the first failure aborts
//! the whole run.

mod types;

use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

use tracing::{debug, info};

use crate::cmake;
use crate::env::BuildEnv;
use crate::manifest::Manifest;
use crate::plan::{BuildOptions, BuildPlan, plan_all};

pub use types::{ExecuteError, ExtensionReport, RunReport};

/// Build every extension in the manifest.
///
/// Checks the cmake installation once, derives all plans up front, then
/// configures and builds each extension in manifest order.
pub fn run(manifest: &Manifest, options: &BuildOptions, env: &BuildEnv) -> Result<RunReport, ExecuteError> {
  let cmake = cmake::probe(&options.cmake, &manifest.extension_names())?;
  let plans = plan_all(manifest, options, env)?;

  info!(count = plans.len(), configuration = %options.configuration(), "building extensions");

  let extensions = plans
    .iter()
    .map(|plan| build_extension(&options.cmake, plan))
    .collect::<Result<Vec<_>, _>>()?;

  Ok(RunReport { cmake, extensions })
}

/// Configure and build a single planned extension.
pub fn build_extension(program: &str, plan: &BuildPlan) -> Result<ExtensionReport, ExecuteError> {
  let started = Instant::now();

  ensure_build_dir(&plan.build_dir)?;
  configure(program, plan)?;
  build(program, plan)?;

  Ok(ExtensionReport {
    extension: plan.extension.clone(),
    output_dir: plan.output_dir.clone(),
    elapsed: started.elapsed(),
  })
}

/// Create the build directory and its parents if missing.
pub fn ensure_build_dir(path: &Path) -> Result<(), ExecuteError> {
  if !path.exists() {
    debug!(path = %path.display(), "creating build directory");
    fs::create_dir_all(path).map_err(|source| ExecuteError::CreateDir {
      path: path.to_path_buf(),
      source,
    })?;
  }
  Ok(())
}

/// Run the configure step with the plan's environment overrides.
pub fn configure(program: &str, plan: &BuildPlan) -> Result<(), ExecuteError> {
  let args = plan.configure_command();
  info!(extension = %plan.extension, "configuring");

  let mut command = Command::new(program);
  command.args(&args).current_dir(&plan.build_dir).envs(&plan.configure_env);

  run_command(command, program, &args)
}

/// Run the build step in the already configured build directory.
pub fn build(program: &str, plan: &BuildPlan) -> Result<(), ExecuteError> {
  let args = plan.build_command();
  info!(extension = %plan.extension, "building");

  let mut command = Command::new(program);
  command.args(&args).current_dir(&plan.build_dir);

  run_command(command, program, &args)
}

fn run_command(mut command: Command, program: &str, args: &[String]) -> Result<(), ExecuteError> {
  debug!(program = %program, args = ?args, "spawning process");

  let status = command.status().map_err(|source| ExecuteError::Spawn {
    program: program.to_string(),
    source,
  })?;

  if !status.success() {
    return Err(ExecuteError::CommandFailed {
      program: program.to_string(),
      args: args.join(" "),
      code: status.code(),
    });
  }

  Ok(())
}
