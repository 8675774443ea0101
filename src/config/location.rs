use std::path::{MAIN_SEPARATOR, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "REWRITE_ARGS_CONFIG";

/// Config file used when `REWRITE_ARGS_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "~/.rewrite-args.conf";

/// Resolve the config file path for this invocation.
pub fn default_config_path() -> PathBuf {
	let lookup = |name: &str| std::env::var(name).ok();
	let configured = lookup(CONFIG_ENV_VAR).filter(|value| !value.is_empty());
	let path = configured.as_deref().unwrap_or(DEFAULT_CONFIG_FILE);
	expand_tilde_with(path, lookup)
}

/// Expand a leading `~` using the process environment.
pub fn expand_tilde(path: &str) -> PathBuf {
	expand_tilde_with(path, |name| std::env::var(name).ok())
}

/// Expand a leading `~` using `lookup` to read environment variables.
///
/// Only `~` on its own or followed by a separator is expanded; `~user` forms are
/// returned untouched. If no home directory can be found the path is returned as-is.
pub fn expand_tilde_with<F>(path: &str, lookup: F) -> PathBuf
where
	F: Fn(&str) -> Option<String>,
{
	let Some(rest) = path.strip_prefix('~') else {
		return PathBuf::from(path);
	};

	if !(rest.is_empty() || rest.starts_with(['/', MAIN_SEPARATOR])) {
		return PathBuf::from(path);
	}

	let Some(home) = home_dir_with(&lookup) else {
		return PathBuf::from(path);
	};

	let rest = rest.trim_start_matches(['/', MAIN_SEPARATOR]);
	if rest.is_empty() { home } else { home.join(rest) }
}

/// Find the home directory from the environment, falling back to `dirs`.
fn home_dir_with<F>(lookup: &F) -> Option<PathBuf>
where
	F: Fn(&str) -> Option<String>,
{
	let from_env = if cfg!(windows) {
		windows_home(lookup)
	} else {
		non_empty(lookup("HOME")).map(PathBuf::from)
	};

	from_env.or_else(dirs::home_dir)
}

/// `%HOMEDRIVE%%HOMEPATH%`, else `%USERPROFILE%`.
fn windows_home<F>(lookup: &F) -> Option<PathBuf>
where
	F: Fn(&str) -> Option<String>,
{
	let drive = lookup("HOMEDRIVE").unwrap_or_default();
	let path = lookup("HOMEPATH").unwrap_or_default();
	let joined = format!("{drive}{path}");

	non_empty(Some(joined))
		.or_else(|| non_empty(lookup("USERPROFILE")))
		.map(PathBuf::from)
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.is_empty())
}
