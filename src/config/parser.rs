use crate::config::types::{Config, ConfigDocument};
use crate::error::{FormatError, Result, RewriteError};
use std::io::ErrorKind;
use std::path::Path;

/// Read, parse and compile the config file at `path`.
pub fn load_config(path: &Path) -> Result<Config> {
	let bytes = std::fs::read(path).map_err(|source| {
		if source.kind() == ErrorKind::NotFound {
			RewriteError::ConfigMissing {
				path: path.to_path_buf(),
			}
		} else {
			RewriteError::ConfigUnreadable {
				path: path.to_path_buf(),
				source,
			}
		}
	})?;

	let content = String::from_utf8(bytes).map_err(|source| RewriteError::ConfigMalformed {
		path: path.to_path_buf(),
		source: source.into(),
	})?;

	let config = parse_config_str(&content, path)?;
	tracing::debug!(
		path = %path.display(),
		rules = config.rules.len(),
		debug = config.debug,
		"loaded config"
	);
	Ok(config)
}

/// Parse a config from a string (useful for testing).
///
/// `path` selects the format: TOML for a `.toml` extension, JSON otherwise.
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let document =
		parse_document(content, path).map_err(|source| RewriteError::ConfigMalformed {
			path: path.to_path_buf(),
			source,
		})?;

	Config::from_document(document)
}

fn parse_document(content: &str, path: &Path) -> std::result::Result<ConfigDocument, FormatError> {
	let is_toml = path
		.extension()
		.is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

	if is_toml {
		Ok(toml::from_str(content)?)
	} else {
		Ok(serde_json::from_str(content)?)
	}
}
