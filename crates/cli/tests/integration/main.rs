//! CLI integration tests driving `extbuild` against a fake cmake.

#![cfg(unix)]

mod build_tests;
mod common;
mod plan_tests;
