use super::CacheArgs;
use anyhow::Result;
use atlas_cache_core::TileCoord;
use clap::Args;
use std::process::ExitCode;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// dataset id, e.g. AAA
	#[arg(required = true)]
	dataset: String,

	/// tile as z/x/y or z-x-y
	#[arg(required = true)]
	tile: TileCoord,
}

pub fn run(arguments: &Subcommand, cache_args: &CacheArgs) -> Result<ExitCode> {
	let cache = cache_args.open_cache()?;
	cache.invalidate(&arguments.dataset, &arguments.tile)?;
	log::info!("invalidated {} {}", arguments.dataset, arguments.tile);
	Ok(ExitCode::SUCCESS)
}
