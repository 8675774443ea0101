//! Argument rewriting for rewrite-args.
//!
//! Each argument is rewritten independently by the configured rules, in order.

pub mod rewriter;

pub use rewriter::{rewrite_arg, rewrite_args};
