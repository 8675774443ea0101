//! Command resolution and execution for rewrite-args.
//!
//! This module handles:
//! - Finding the target executable on `PATH` while skipping our own binary
//! - Replacing the current process with the target

pub mod launch;
pub mod resolve;

pub use launch::{exec_line, launch};
pub use resolve::{ResolvedExecutable, resolve_executable, resolve_in};
