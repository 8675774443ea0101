//! Configuration loading for rewrite-args.
//!
//! This module handles:
//! - Locating the config file (`~/.rewrite-args.conf` or `$REWRITE_ARGS_CONFIG`)
//! - Home directory expansion
//! - JSON (or TOML) document parsing and rule compilation

pub mod location;
pub mod parser;
pub mod types;

pub use location::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, default_config_path, expand_tilde};
pub use parser::{load_config, parse_config_str};
pub use types::{Config, ConfigDocument, PatternRule, RewriteEntry};
