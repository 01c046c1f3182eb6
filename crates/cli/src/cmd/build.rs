//! Implementation of the `extbuild build` command.
//!
//! Checks the CMake installation, then configures and builds every extension
//! listed in the manifest.

use anyhow::{Context, Result};
use tracing::info;

use extbuild_lib::{BuildEnv, run};

use crate::cmd::BuildArgs;
use crate::output::{Status, detail, elapsed, status};

pub fn cmd_build(args: &BuildArgs) -> Result<()> {
  let (manifest, options) = args.resolve()?;
  let env = BuildEnv::from_process();

  status(
    Status::Step,
    &format!(
      "Building {} {} ({})",
      manifest.package.name,
      manifest.package.version,
      options.configuration()
    ),
  );

  let report = run(&manifest, &options, &env).context("Build failed")?;
  info!(version = %report.cmake.version, "build finished");

  println!();
  for ext in &report.extensions {
    status(Status::Done, &format!("{} ({})", ext.extension, elapsed(ext.elapsed)));
    detail("Output", ext.output_dir.display());
  }
  println!();
  println!("Build complete!");

  Ok(())
}
