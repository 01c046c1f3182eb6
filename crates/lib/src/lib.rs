//! extbuild-lib: build native extension modules through CMake.
//!
//! This crate provides the pieces of an extension build:
//! - `Manifest`: the package and the extensions it ships
//! - `BuildEnv`: the environment variables that steer toolchain selection
//! - `BuildPlan`: the derived configure/build invocations for one extension
//! - `execute::run`: probing cmake and running every plan

pub mod cmake;
pub mod env;
pub mod execute;
pub mod manifest;
pub mod plan;
pub mod platform;

#[cfg(test)]
mod util;

pub use env::BuildEnv;
pub use execute::{ExecuteError, RunReport, run};
pub use manifest::{Extension, Manifest, ManifestError};
pub use plan::{BuildConfiguration, BuildOptions, BuildPlan, PlanError};
