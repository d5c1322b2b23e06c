pub mod clear;
pub mod get;
pub mod invalidate;
pub mod resolve;

use anyhow::{Result, anyhow};
use atlas_cache::AppConfig;
use atlas_cache_core::{TileCoord, TileFileCache};
use clap::Args;
use std::path::PathBuf;

/// Options shared by every subcommand. Flags override values from the config file.
#[derive(Args, Debug, Default)]
pub struct CacheArgs {
	/// YAML config file
	#[arg(long, short, global = true, value_name = "FILE")]
	config: Option<PathBuf>,

	/// root of the remote store, a URI or an absolute path
	#[arg(long, global = true)]
	uri: Option<String>,

	/// cache namespace
	#[arg(long, global = true)]
	namespace: Option<String>,

	/// path scheme: zz-subfolder, zz-xx-subfolders, flat or a template
	/// like "{dataset}/{z}/{x}/{y}.atlas"
	#[arg(long, global = true, verbatim_doc_comment)]
	scheme: Option<String>,

	/// directory holding the local cache
	#[arg(long, global = true, value_name = "DIR")]
	cache_dir: Option<PathBuf>,

	/// remote store setting, can be repeated, e.g. --store http.timeout_seconds=30
	#[arg(long = "store", global = true, value_name = "KEY=VALUE", value_parser = parse_key_value)]
	store: Vec<(String, String)>,
}

impl CacheArgs {
	pub fn load(&self) -> Result<AppConfig> {
		let mut config = match &self.config {
			Some(path) => AppConfig::from_path(path)?,
			None => AppConfig::default(),
		};

		if let Some(uri) = &self.uri {
			config.backing_uri = Some(uri.clone());
		}
		if let Some(namespace) = &self.namespace {
			config.namespace = Some(namespace.clone());
		}
		if let Some(scheme) = &self.scheme {
			config.scheme = Some(scheme.clone());
		}
		if let Some(cache_dir) = &self.cache_dir {
			config.cache.cache_dir = Some(cache_dir.clone());
		}
		config.store.extend(self.store.iter().cloned());

		log::debug!("using config {config:?}");
		Ok(config)
	}

	pub fn open_cache(&self) -> Result<TileFileCache<TileCoord>> {
		self.load()?.open_cache()
	}
}

fn parse_key_value(text: &str) -> Result<(String, String)> {
	let (key, value) = text
		.split_once('=')
		.ok_or_else(|| anyhow!("expected KEY=VALUE, found '{text}'"))?;
	let key = key.trim();
	if key.is_empty() {
		return Err(anyhow!("empty key in '{text}'"));
	}
	Ok((key.to_string(), value.to_string()))
}
