use crate::error::{Result, RewriteError};
use std::ffi::{OsStr, OsString};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// A command name resolved to a file that can be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
	/// Path of the executable, as found.
	pub path: PathBuf,

	/// The name that was looked up.
	pub original_name: OsString,
}

/// Resolve `name` against the process `PATH`.
///
/// See [`resolve_in`].
pub fn resolve_executable(name: &OsStr, exclude: Option<&Path>) -> Result<ResolvedExecutable> {
	let search_path = std::env::var_os("PATH");
	resolve_in(name, search_path.as_deref(), exclude)
}

/// Resolve `name` against an explicit search path.
///
/// A name containing a path separator is checked as-is and is never excluded.
/// Otherwise each directory of `search_path` is tried in order, an empty entry
/// meaning the current directory. Candidates that are the same file as `exclude`
/// are skipped, so a binary installed under the name it wraps can't exec itself.
pub fn resolve_in(
	name: &OsStr,
	search_path: Option<&OsStr>,
	exclude: Option<&Path>,
) -> Result<ResolvedExecutable> {
	let not_found = || RewriteError::NotFound {
		command: name.to_string_lossy().into_owned(),
	};

	if name.is_empty() {
		return Err(not_found());
	}

	if has_separator(name) {
		let path = PathBuf::from(name);
		if !is_executable(&path) {
			return Err(not_found());
		}
		return Ok(ResolvedExecutable {
			path,
			original_name: name.to_os_string(),
		});
	}

	let Some(search_path) = search_path else {
		return Err(not_found());
	};

	for dir in search_dirs(search_path) {
		let candidate = dir.join(name);
		if !is_executable(&candidate) {
			continue;
		}

		if let Some(exclude) = exclude
			&& is_same_file(&candidate, exclude)
		{
			tracing::debug!(
				candidate = %candidate.display(),
				exclude = %exclude.display(),
				"skipping own executable"
			);
			continue;
		}

		return Ok(ResolvedExecutable {
			path: candidate,
			original_name: name.to_os_string(),
		});
	}

	Err(not_found())
}

/// Whether `name` is a path rather than a bare command name.
fn has_separator(name: &OsStr) -> bool {
	name.as_encoded_bytes()
		.iter()
		.any(|&b| b == b'/' || char::from(b) == MAIN_SEPARATOR)
}

/// Split a search path, mapping empty entries to `.` as shells do.
fn search_dirs(search_path: &OsStr) -> Vec<PathBuf> {
	std::env::split_paths(search_path)
		.map(|dir| {
			if dir.as_os_str().is_empty() {
				PathBuf::from(".")
			} else {
				dir
			}
		})
		.collect()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
	use std::os::unix::fs::PermissionsExt;

	std::fs::metadata(path)
		.is_ok_and(|meta| !meta.is_dir() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
	std::fs::metadata(path).is_ok_and(|meta| meta.is_file())
}

/// Whether `candidate` and `exclude` name the same file.
///
/// Matches on identical spelling, identical canonical path (symlinks resolved), or
/// identical file identity where the platform exposes one.
fn is_same_file(candidate: &Path, exclude: &Path) -> bool {
	if candidate.as_os_str() == exclude.as_os_str() {
		return true;
	}

	if let (Ok(a), Ok(b)) = (candidate.canonicalize(), exclude.canonicalize())
		&& a == b
	{
		return true;
	}

	same_file_identity(candidate, exclude)
}

#[cfg(unix)]
fn same_file_identity(a: &Path, b: &Path) -> bool {
	use std::os::unix::fs::MetadataExt;

	match (std::fs::metadata(a), std::fs::metadata(b)) {
		(Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
		_ => false,
	}
}

#[cfg(not(unix))]
fn same_file_identity(_a: &Path, _b: &Path) -> bool {
	false
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_search_dirs_empty_entry_is_current_dir() {
		let search_path = std::env::join_paths(["/usr/bin", "", "/bin"]).unwrap();
		assert_eq!(
			search_dirs(&search_path),
			vec![
				PathBuf::from("/usr/bin"),
				PathBuf::from("."),
				PathBuf::from("/bin")
			]
		);
	}

	#[test]
	fn test_no_search_path_is_not_found() {
		let result = resolve_in(OsStr::new("ssh"), None, None);
		match result.unwrap_err() {
			RewriteError::NotFound { command } => assert_eq!(command, "ssh"),
			other => panic!("Expected NotFound error, got {other:?}"),
		}
	}

	#[test]
	fn test_empty_name_is_not_found() {
		let search_path = OsString::from("/bin");
		assert!(resolve_in(OsStr::new(""), Some(search_path.as_os_str()), None).is_err());
	}

	#[test]
	fn test_has_separator() {
		assert!(has_separator(OsStr::new("./ssh")));
		assert!(has_separator(OsStr::new("/usr/bin/ssh")));
		assert!(has_separator(OsStr::new("bin/ssh")));
		assert!(!has_separator(OsStr::new("ssh")));
	}

	#[test]
	fn test_explicit_path_not_found() {
		let result = resolve_in(OsStr::new("/nonexistent/path/to/binary"), None, None);
		assert!(matches!(result, Err(RewriteError::NotFound { .. })));
	}

	#[cfg(unix)]
	mod unix {
		use super::*;
		use std::fs;
		use std::os::unix::fs::PermissionsExt;
		use tempfile::TempDir;

		fn write_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
			let path = dir.join(name);
			fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
			fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
			path
		}

		fn search_path(dirs: &[&TempDir]) -> OsString {
			std::env::join_paths(dirs.iter().map(|d| d.path())).unwrap()
		}

		#[test]
		fn test_first_match_in_order_wins() {
			let first = tempfile::tempdir().unwrap();
			let second = tempfile::tempdir().unwrap();
			let expected = write_file(first.path(), "ssh", 0o755);
			write_file(second.path(), "ssh", 0o755);
			let path = search_path(&[&first, &second]);

			let resolved = resolve_in(OsStr::new("ssh"), Some(path.as_os_str()), None).unwrap();
			assert_eq!(resolved.path, expected);
			assert_eq!(resolved.original_name, OsString::from("ssh"));
		}

		#[test]
		fn test_skips_non_executable_files() {
			let first = tempfile::tempdir().unwrap();
			let second = tempfile::tempdir().unwrap();
			write_file(first.path(), "ssh", 0o644);
			let expected = write_file(second.path(), "ssh", 0o700);
			let path = search_path(&[&first, &second]);

			let resolved = resolve_in(OsStr::new("ssh"), Some(path.as_os_str()), None).unwrap();
			assert_eq!(resolved.path, expected);
		}

		#[test]
		fn test_skips_directories() {
			let first = tempfile::tempdir().unwrap();
			let second = tempfile::tempdir().unwrap();
			fs::create_dir(first.path().join("ssh")).unwrap();
			let expected = write_file(second.path(), "ssh", 0o755);
			let path = search_path(&[&first, &second]);

			let resolved = resolve_in(OsStr::new("ssh"), Some(path.as_os_str()), None).unwrap();
			assert_eq!(resolved.path, expected);
		}

		#[test]
		fn test_excluded_first_match_is_skipped() {
			let first = tempfile::tempdir().unwrap();
			let second = tempfile::tempdir().unwrap();
			let own = write_file(first.path(), "ssh", 0o755);
			let expected = write_file(second.path(), "ssh", 0o755);
			let path = search_path(&[&first, &second]);

			let resolved = resolve_in(OsStr::new("ssh"), Some(path.as_os_str()), Some(own.as_path())).unwrap();
			assert_eq!(resolved.path, expected);
			assert_ne!(resolved.path, own);
		}

		#[test]
		fn test_excluded_only_match_is_not_found() {
			let dir = tempfile::tempdir().unwrap();
			let own = write_file(dir.path(), "ssh", 0o755);
			let path = search_path(&[&dir]);

			let result = resolve_in(OsStr::new("ssh"), Some(path.as_os_str()), Some(own.as_path()));
			assert!(matches!(result, Err(RewriteError::NotFound { .. })));
		}

		#[test]
		fn test_excluded_through_symlink() {
			let bin = tempfile::tempdir().unwrap();
			let first = tempfile::tempdir().unwrap();
			let second = tempfile::tempdir().unwrap();
			let own = write_file(bin.path(), "rewrite-args", 0o755);
			std::os::unix::fs::symlink(&own, first.path().join("ssh")).unwrap();
			let expected = write_file(second.path(), "ssh", 0o755);
			let path = search_path(&[&first, &second]);

			let resolved = resolve_in(OsStr::new("ssh"), Some(path.as_os_str()), Some(own.as_path())).unwrap();
			assert_eq!(resolved.path, expected);
		}

		#[test]
		fn test_excluded_through_hard_link() {
			let bin = tempfile::tempdir().unwrap();
			let first = tempfile::tempdir().unwrap();
			let own = write_file(bin.path(), "rewrite-args", 0o755);
			if fs::hard_link(&own, first.path().join("ssh")).is_err() {
				// Temp dirs on different filesystems.
				return;
			}
			let path = search_path(&[&first]);

			let result = resolve_in(OsStr::new("ssh"), Some(path.as_os_str()), Some(own.as_path()));
			assert!(matches!(result, Err(RewriteError::NotFound { .. })));
		}

		#[test]
		fn test_explicit_path_ignores_search_path_and_exclusion() {
			let dir = tempfile::tempdir().unwrap();
			let own = write_file(dir.path(), "ssh", 0o755);
			let resolved = resolve_in(own.as_os_str(), None, Some(own.as_path())).unwrap();
			assert_eq!(resolved.path, own);
		}

		#[test]
		fn test_explicit_path_must_be_executable() {
			let dir = tempfile::tempdir().unwrap();
			let path = write_file(dir.path(), "ssh", 0o644);

			let result = resolve_in(path.as_os_str(), None, None);
			assert!(matches!(result, Err(RewriteError::NotFound { .. })));
		}

		#[test]
		fn test_missing_everywhere_is_not_found() {
			let dir = tempfile::tempdir().unwrap();
			write_file(dir.path(), "scp", 0o755);
			let path = search_path(&[&dir]);

			let result = resolve_in(OsStr::new("ssh"), Some(path.as_os_str()), None);
			match result.unwrap_err() {
				RewriteError::NotFound { command } => assert_eq!(command, "ssh"),
				other => panic!("Expected NotFound error, got {other:?}"),
			}
		}

		#[test]
		fn test_non_utf8_command_name() {
			use std::os::unix::ffi::OsStringExt;

			let dir = tempfile::tempdir().unwrap();
			let name = OsString::from_vec(b"caf\xe9".to_vec());
			let expected = dir.path().join(&name);
			fs::write(&expected, "#!/bin/sh\nexit 0\n").unwrap();
			fs::set_permissions(&expected, fs::Permissions::from_mode(0o755)).unwrap();
			let path = search_path(&[&dir]);

			let resolved = resolve_in(&name, Some(path.as_os_str()), None).unwrap();
			assert_eq!(resolved.path, expected);
			assert_eq!(resolved.original_name, name);
		}
	}
}
