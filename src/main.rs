use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use rewrite_args::config::{default_config_path, load_config};
use rewrite_args::exec::{launch, resolve_executable};
use rewrite_args::rules::rewrite_args;
use rewrite_args::{PREFIX, USAGE};

/// Environment variable holding tracing filter directives, e.g. `rewrite_args=debug`.
const LOG_ENV_VAR: &str = "REWRITE_ARGS_LOG";

#[derive(Parser)]
#[command(name = "rewrite-args")]
#[command(about = "Rewrite command arguments with regex rules, then exec the real command")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
	/// Command to run, followed by its arguments
	#[arg(
		trailing_var_arg = true,
		allow_hyphen_values = true,
		value_parser = clap::value_parser!(OsString)
	)]
	args: Vec<OsString>,
}

/// Install a stderr tracing subscriber when `REWRITE_ARGS_LOG` is set.
fn init_tracing() {
	let Ok(directives) = std::env::var(LOG_ENV_VAR) else {
		return;
	};

	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::new(directives))
		.with_writer(std::io::stderr)
		.init();
}

fn main() -> ExitCode {
	init_tracing();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("{PREFIX}{e:#}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::try_parse().context("invalid arguments")?;

	let config = load_config(&default_config_path())?;

	let mut argv = vec![program_name()];
	argv.extend(cli.args);
	let argv = rewrite_args(&config.rules, argv);

	if argv.len() == 1 {
		println!("{USAGE}");
		let shown: Vec<_> = argv.iter().map(|arg| arg.to_string_lossy()).collect();
		println!("\n{}", shown.join(" "));
		return Ok(ExitCode::FAILURE);
	}

	// Our own binary may sit on PATH under the name being wrapped.
	let own_executable = std::env::current_exe().ok();

	let command_args = &argv[1..];
	let resolved = resolve_executable(&command_args[0], own_executable.as_deref())?;

	Ok(launch(
		&resolved,
		command_args,
		std::env::vars_os(),
		config.debug,
	)?)
}

/// The name this process was invoked as.
fn program_name() -> OsString {
	std::env::args_os()
		.next()
		.unwrap_or_else(|| OsString::from("rewrite-args"))
}
