//! rewrite-args - rewrite a command's arguments with regex rules, then exec it.
//!
//! Installed behind a shell alias (`alias ssh='rewrite-args ssh -X'`), it expands
//! short hostnames or identifiers into their fully-qualified forms before the real
//! program runs. The pipeline is:
//! - Load the rule list from `~/.rewrite-args.conf`
//! - Rewrite every argument with the rules, in order
//! - Resolve the target command on `PATH`, skipping our own executable
//! - Replace the current process with the target
//!
//! # Example
//!
//! ```no_run
//! use rewrite_args::config::{default_config_path, load_config};
//! use rewrite_args::exec::resolve_executable;
//! use rewrite_args::rules::rewrite_args;
//!
//! let config = load_config(&default_config_path()).unwrap();
//! let args = rewrite_args(&config.rules, vec!["ssh".into(), "worker-n01.use1".into()]);
//! let resolved = resolve_executable(&args[0], None).unwrap();
//! println!("would exec {} {:?}", resolved.path.display(), args);
//! ```

pub mod config;
pub mod error;
pub mod exec;
pub mod rules;

pub use error::{FormatError, Result, RewriteError};

/// Prefix for every diagnostic line, so output is easy to grep.
pub const PREFIX: &str = "[rewrite-args] ";

/// Usage block shown on a bare invocation and when the config file is missing.
pub const USAGE: &str = r#"
# If the following is true
alias ssh='rewrite-args ssh -X'

# and ~/.rewrite-args.conf contains
{
  "debug": false,
  "rewrites": [
    {
      "match": ".use1",
      "replace": ".prod.us-east-1.postgun.com"
    }
  ]
}

# Given the following command
ssh worker-n01.use1

# Will expand to
/usr/bin/ssh -X worker-n01.prod.us-east-1.postgun.com
"#;
