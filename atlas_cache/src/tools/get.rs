use super::CacheArgs;
use anyhow::{Context, Result};
use atlas_cache_core::TileCoord;
use clap::Args;
use std::{io::Write, path::PathBuf, process::ExitCode};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// dataset id, e.g. AAA
	#[arg(required = true)]
	dataset: String,

	/// tile as z/x/y or z-x-y
	#[arg(required = true)]
	tile: TileCoord,

	/// write the file here instead of stdout
	#[arg(long, short)]
	output: Option<PathBuf>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand, cache_args: &CacheArgs) -> Result<ExitCode> {
	let cache = cache_args.open_cache()?;

	let Some(blob) = cache.get(&arguments.dataset, &arguments.tile).await? else {
		eprintln!("not found");
		return Ok(ExitCode::FAILURE);
	};

	match &arguments.output {
		Some(path) => std::fs::write(path, blob.as_slice()).with_context(|| format!("failed to write {path:?}"))?,
		None => {
			let mut stdout = std::io::stdout().lock();
			stdout.write_all(blob.as_slice())?;
			stdout.flush()?;
		}
	}
	log::info!("fetched {} bytes for {} {}", blob.len(), arguments.dataset, arguments.tile);

	Ok(ExitCode::SUCCESS)
}
