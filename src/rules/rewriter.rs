use crate::config::PatternRule;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

/// Rewrite a single argument with every rule in order.
///
/// Each rule sees the output of the previous one. An argument no rule matches is
/// returned unchanged, byte for byte.
pub fn rewrite_arg<'a>(rules: &[PatternRule], arg: &'a OsStr) -> Cow<'a, OsStr> {
	let Some(bytes) = arg_bytes(arg) else {
		return Cow::Borrowed(arg);
	};

	let mut current = Cow::Borrowed(bytes);

	for rule in rules {
		let replaced = match rule.apply(&current) {
			Cow::Owned(replaced) => replaced,
			Cow::Borrowed(_) => continue,
		};
		tracing::trace!(
			pattern = rule.pattern(),
			from = %String::from_utf8_lossy(&current),
			to = %String::from_utf8_lossy(&replaced),
			"rewrote argument"
		);
		current = Cow::Owned(replaced);
	}

	match current {
		Cow::Borrowed(_) => Cow::Borrowed(arg),
		Cow::Owned(bytes) => Cow::Owned(bytes_to_os_string(bytes)),
	}
}

/// Rewrite every argument of an argument vector.
pub fn rewrite_args(rules: &[PatternRule], mut args: Vec<OsString>) -> Vec<OsString> {
	for arg in &mut args {
		let replaced = match rewrite_arg(rules, arg) {
			Cow::Owned(replaced) => replaced,
			Cow::Borrowed(_) => continue,
		};
		*arg = replaced;
	}
	args
}

#[cfg(unix)]
fn arg_bytes(arg: &OsStr) -> Option<&[u8]> {
	use std::os::unix::ffi::OsStrExt;

	Some(arg.as_bytes())
}

#[cfg(unix)]
fn bytes_to_os_string(bytes: Vec<u8>) -> OsString {
	use std::os::unix::ffi::OsStringExt;

	OsString::from_vec(bytes)
}

/// Without raw byte access, only arguments that are valid Unicode are rewritten.
#[cfg(not(unix))]
fn arg_bytes(arg: &OsStr) -> Option<&[u8]> {
	arg.to_str().map(str::as_bytes)
}

#[cfg(not(unix))]
fn bytes_to_os_string(bytes: Vec<u8>) -> OsString {
	match String::from_utf8(bytes) {
		Ok(text) => text.into(),
		Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned().into(),
	}
}
