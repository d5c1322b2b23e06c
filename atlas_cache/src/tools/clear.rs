use super::CacheArgs;
use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

#[derive(Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {}

pub fn run(_arguments: &Subcommand, cache_args: &CacheArgs) -> Result<ExitCode> {
	let cache = cache_args.open_cache()?;
	// entries published while clearing are removed but not counted
	let count = cache.entries()?.len();
	cache.invalidate_all()?;
	println!("removed {count} entries from {:?} (counted before clearing)", cache.cache_root());
	Ok(ExitCode::SUCCESS)
}
