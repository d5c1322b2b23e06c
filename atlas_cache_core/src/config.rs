//! Settings of the local side of the cache.
//!
//! The default cache directory can be set with the environment variable `ATLAS_CACHE_DIR`.
//! Without it, `atlas_cache` inside the system temporary folder is used.

use serde::Deserialize;
use std::{
	path::{Path, PathBuf},
	time::Duration,
};

lazy_static::lazy_static! {
	pub static ref DEFAULT_CACHE_DIR: PathBuf = std::env::var("ATLAS_CACHE_DIR").map_or_else(|_| std::env::temp_dir().join("atlas_cache"), PathBuf::from);
}

const DEFAULT_STALE_TEMP_AGE_SECONDS: u64 = 3600;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct CacheConfig {
	/// Directory holding one root per `(namespace, backing URI)` pair.
	pub cache_dir: Option<PathBuf>,
	/// Temporary files older than this are removed when a cache is built.
	pub stale_temp_age_seconds: u64,
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			cache_dir: None,
			stale_temp_age_seconds: DEFAULT_STALE_TEMP_AGE_SECONDS,
		}
	}
}

impl CacheConfig {
	#[must_use]
	pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
		self.cache_dir = Some(cache_dir.into());
		self
	}

	/// The configured directory, or [`DEFAULT_CACHE_DIR`].
	pub fn cache_dir(&self) -> &Path {
		self.cache_dir.as_deref().unwrap_or(DEFAULT_CACHE_DIR.as_path())
	}

	pub fn stale_temp_age(&self) -> Duration {
		Duration::from_secs(self.stale_temp_age_seconds)
	}
}
