use super::CacheArgs;
use anyhow::Result;
use atlas_cache_core::{
	CacheId, DEFAULT_NAMESPACE, TileCoord,
	scheme::{PathScheme, validate_remote_path},
};
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

/// Only evaluates the path scheme, neither the remote store nor the cache directory is touched.
pub fn run(arguments: &Subcommand, cache_args: &CacheArgs) -> Result<ExitCode> {
	let config = cache_args.load()?;
	let path = config.path_scheme()?.resolve(&arguments.dataset, &arguments.tile)?;
	validate_remote_path(&path)?;
	let namespace = config.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);

	println!("path: {path}");
	println!("cache id: {}", CacheId::resolve(namespace, &path));
	Ok(ExitCode::SUCCESS)
}
