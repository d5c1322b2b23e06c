mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	cache: tools::CacheArgs,

	#[command(flatten)]
	verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Fetch a tile file through the cache
	Get(tools::get::Subcommand),

	/// Remove the cached copy of one tile file
	Invalidate(tools::invalidate::Subcommand),

	/// Remove every cached file of the namespace
	Clear(tools::clear::Subcommand),

	/// Print the remote path and cache id of a tile file
	Resolve(tools::resolve::Subcommand),
}

fn main() -> Result<ExitCode> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(&cli)
}

fn run(cli: &Cli) -> Result<ExitCode> {
	match &cli.command {
		Commands::Get(arguments) => tools::get::run(arguments, &cli.cache),
		Commands::Invalidate(arguments) => tools::invalidate::run(arguments, &cli.cache),
		Commands::Clear(arguments) => tools::clear::run(arguments, &cli.cache),
		Commands::Resolve(arguments) => tools::resolve::run(arguments, &cli.cache),
	}
}

#[cfg(test)]
mod tests {
	use crate::{Cli, run};
	use anyhow::Result;
	use clap::Parser;
	use std::process::ExitCode;

	pub fn run_command(arg_vec: Vec<&str>) -> Result<ExitCode> {
		let cli = Cli::try_parse_from(arg_vec)?;
		run(&cli)
	}

	#[test]
	fn help() {
		let err = run_command(vec!["atlas_cache"]).unwrap_err().to_string();
		assert!(err.contains("Usage: atlas_cache [OPTIONS] <COMMAND>"));
	}

	#[test]
	fn version() {
		let err = run_command(vec!["atlas_cache", "-V"]).unwrap_err().to_string();
		assert!(err.starts_with("atlas_cache "));
	}

	#[test]
	fn get_requires_arguments() {
		let err = run_command(vec!["atlas_cache", "get"]).unwrap_err().to_string();
		assert!(err.contains("<DATASET>"), "{err}");
	}

	#[test]
	fn bad_tiles_are_rejected_by_the_parser() {
		let err = run_command(vec!["atlas_cache", "resolve", "AAA", "1/2"]).unwrap_err().to_string();
		assert!(err.contains("z/x/y"), "{err}");
	}
}
