use crate::PREFIX;
use crate::error::{Result, RewriteError};
use crate::exec::ResolvedExecutable;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, ExitCode};

/// Hand control to `executable` with `args` as its full argument vector.
///
/// `args[0]` becomes the program's `argv[0]`; `env` is passed through as the
/// complete environment. On Unix the current process image is replaced, so this
/// only returns on failure. Elsewhere the target runs as a child with inherited
/// stdio and its exit code is returned for the caller to exit with.
///
/// With `debug` set, the exec line is printed to stderr first.
pub fn launch<I, K, V>(
	executable: &ResolvedExecutable,
	args: &[OsString],
	env: I,
	debug: bool,
) -> Result<ExitCode>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<OsStr>,
	V: AsRef<OsStr>,
{
	if debug {
		eprintln!("{}", exec_line(&executable.path, args));
	}

	let (argv0, rest) = match args.split_first() {
		Some((first, rest)) => (first.as_os_str(), rest),
		None => (executable.original_name.as_os_str(), args),
	};

	let mut command = Command::new(&executable.path);
	command.args(rest).env_clear().envs(env);

	tracing::debug!(path = %executable.path.display(), ?args, "launching");
	replace_process(command, argv0, &executable.path)
}

/// Format the debug line shown before launching.
pub fn exec_line(path: &Path, args: &[OsString]) -> String {
	let args: Vec<_> = args.iter().map(|arg| arg.to_string_lossy()).collect();
	format!("{PREFIX}exec: [{}] [{}]", path.display(), args.join(" "))
}

#[cfg(unix)]
fn replace_process(mut command: Command, argv0: &OsStr, path: &Path) -> Result<ExitCode> {
	use std::os::unix::process::CommandExt;

	let source = command.arg0(argv0).exec();
	Err(RewriteError::LaunchFailed {
		path: path.to_path_buf(),
		source,
	})
}

#[cfg(not(unix))]
fn replace_process(mut command: Command, _argv0: &OsStr, path: &Path) -> Result<ExitCode> {
	use std::process::Stdio;

	let status = command
		.stdin(Stdio::inherit())
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit())
		.status()
		.map_err(|source| RewriteError::LaunchFailed {
			path: path.to_path_buf(),
			source,
		})?;

	Ok(ExitCode::from(exit_code_byte(status.code().unwrap_or(1))))
}

/// Narrow a child's exit code to the byte `ExitCode` carries.
///
/// A non-zero code whose low byte is zero (e.g. 256 on Windows) maps to 1 so a
/// failure never reads as success.
#[cfg_attr(unix, allow(dead_code))]
fn exit_code_byte(code: i32) -> u8 {
	match code as u8 {
		0 if code != 0 => 1,
		byte => byte,
	}
}
