use std::path::PathBuf;

use crate::USAGE;

/// Library-level structured errors for rewrite-args.
///
/// Every variant is terminal: the binary reports it and exits with status 1.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
	#[error("config '{}' missing....\n{}", .path.display(), USAGE)]
	ConfigMissing { path: PathBuf },

	#[error("while reading config '{}'", .path.display())]
	ConfigUnreadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("while un-marshalling config '{}'", .path.display())]
	ConfigMalformed {
		path: PathBuf,
		#[source]
		source: FormatError,
	},

	#[error("failed to compile regex '{pattern}'")]
	RuleInvalid {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("{command}: command not found")]
	NotFound { command: String },

	#[error("exec: {}", .path.display())]
	LaunchFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Parse failure for one of the supported config document formats.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Toml(#[from] toml::de::Error),

	#[error("config is not valid UTF-8")]
	Encoding(#[from] std::string::FromUtf8Error),
}

/// Result type alias using RewriteError.
pub type Result<T> = std::result::Result<T, RewriteError>;
