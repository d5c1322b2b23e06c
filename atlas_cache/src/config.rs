//! YAML configuration of the `atlas_cache` tool.
//!
//! ```yaml
//! backing_uri: file:///data/atlas
//! namespace: nightly
//! scheme: zz-subfolder
//! cache:
//!   cache_dir: /var/cache/atlas
//!   stale_temp_age_seconds: 600
//! store:
//!   http.timeout_seconds: "30"
//! ```
//!
//! Every field is optional in the file. `backing_uri` must be known once command line
//! overrides have been applied.

use anyhow::{Context, Result, anyhow};
use atlas_cache_core::{
	CacheConfig, TileCoord, TileFileCache,
	io::StoreConfig,
	scheme::{SlippyTileScheme, SlippyTileSchemeType},
};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
	/// Root of the remote store, a URI or an absolute path.
	#[serde(default)]
	pub backing_uri: Option<String>,

	/// Cache namespace. The library default is used when missing.
	#[serde(default)]
	pub namespace: Option<String>,

	/// Preset name or template, see [`SlippyTileScheme`]. Defaults to `zz-subfolder`.
	#[serde(default)]
	pub scheme: Option<String>,

	#[serde(default)]
	pub cache: CacheConfig,

	/// Passed verbatim to the remote store.
	#[serde(default)]
	pub store: StoreConfig,
}

impl AppConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("failed to open config file {path:?}"))?;
		Self::from_reader(BufReader::new(file)).with_context(|| format!("failed to parse config file {path:?}"))
	}

	pub fn path_scheme(&self) -> Result<SlippyTileScheme> {
		match &self.scheme {
			Some(scheme) => scheme.parse(),
			None => Ok(SlippyTileScheme::new(SlippyTileSchemeType::ZzSubfolder)),
		}
	}

	pub fn open_cache(&self) -> Result<TileFileCache<TileCoord>> {
		let uri = self
			.backing_uri
			.as_deref()
			.ok_or_else(|| anyhow!("no backing URI given, use --uri or 'backing_uri' in the config file"))?;

		let mut builder = TileFileCache::<TileCoord>::builder(uri, self.path_scheme()?)
			.store_config(self.store.clone())
			.cache_config(self.cache.clone());
		if let Some(namespace) = &self.namespace {
			builder = builder.namespace(namespace);
		}
		Ok(builder.build()?)
	}
}
