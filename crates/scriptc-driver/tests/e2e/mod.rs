//! End-to-end tests for the `scriptc` CLI binary.
//!
//! These drive the compiled binary through `assert_cmd`, exercising the
//! CLI surface (§6) rather than `scriptc_driver::compile` directly.

mod cli_tests;
mod compilation_tests;
mod snapshot_tests;
