//! Implementation of the `extbuild plan` command.
//!
//! Prints the cmake invocations a build would run, without probing cmake or
//! touching the filesystem.

use anyhow::{Context, Result};

use extbuild_lib::BuildEnv;
use extbuild_lib::plan::plan_all;

use crate::cmd::BuildArgs;
use crate::output::{ARROW, OutputFormat, Status, detail, format_command, print_json, status};

pub fn cmd_plan(args: &BuildArgs, format: OutputFormat) -> Result<()> {
  let (manifest, options) = args.resolve()?;
  let env = BuildEnv::from_process();

  let plans = plan_all(&manifest, &options, &env).context("Failed to derive cmake arguments")?;

  if format.is_json() {
    return print_json(&plans);
  }

  println!("Package: {} {}", manifest.package.name, manifest.package.version);
  println!("Configuration: {}", options.configuration());

  for plan in &plans {
    println!();
    status(Status::Step, &plan.extension);
    detail("Source", plan.source_dir.display());
    detail("Build dir", plan.build_dir.display());
    detail("Output", plan.output_dir.display());
    for (key, value) in &plan.configure_env {
      detail("Env", format!("{}={}", key, value));
    }
    println!("  {} {}", ARROW, format_command(&options.cmake, &plan.configure_command()));
    println!("  {} {}", ARROW, format_command(&options.cmake, &plan.build_command()));
  }

  Ok(())
}
