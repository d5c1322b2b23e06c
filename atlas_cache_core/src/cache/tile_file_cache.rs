//! The public cache object.
//!
//! A [`TileFileCache`] is built from a backing URI, a [`PathScheme`], an optional
//! namespace and a free-form [`StoreConfig`] that is handed to the remote store untouched.
//! Entries live in `<cache_dir>/<root name>`, where the root name is derived from the
//! namespace and the normalised backing URI.

use super::{CacheId, CacheStatsSnapshot, DEFAULT_NAMESPACE, FetchCoordinator, LocalStore, cache_root_name};
use crate::{
	Blob,
	config::CacheConfig,
	error::CacheError,
	io::{RemoteStore, StoreConfig, open_remote_store, parse_backing_uri},
	scheme::{PathScheme, validate_remote_path},
};
use anyhow::Result;
use std::{
	fmt::{self, Debug},
	path::{Path, PathBuf},
	sync::Arc,
};

/// Local-disk cache in front of a remote store, keyed by `(dataset id, tile)`.
///
/// Cloning is cheap; clones share the same local store, fetch markers and counters.
pub struct TileFileCache<T> {
	inner: Arc<Inner<T>>,
}

struct Inner<T> {
	backing_uri: String,
	scheme: Arc<dyn PathScheme<T>>,
	coordinator: FetchCoordinator,
}

impl<T: Debug + 'static> TileFileCache<T> {
	/// Opens a cache in the default namespace.
	pub fn new(uri: &str, scheme: impl PathScheme<T> + 'static, store_config: StoreConfig) -> Result<Self, CacheError> {
		Self::builder(uri, scheme).store_config(store_config).build()
	}

	pub fn new_with_namespace(
		uri: &str,
		namespace: &str,
		scheme: impl PathScheme<T> + 'static,
		store_config: StoreConfig,
	) -> Result<Self, CacheError> {
		Self::builder(uri, scheme)
			.namespace(namespace)
			.store_config(store_config)
			.build()
	}

	pub fn builder(uri: &str, scheme: impl PathScheme<T> + 'static) -> TileFileCacheBuilder<T> {
		TileFileCacheBuilder {
			backing_uri: uri.to_string(),
			scheme: Arc::new(scheme),
			namespace: None,
			store_config: StoreConfig::new(),
			cache_config: CacheConfig::default(),
			remote_store: None,
		}
	}

	/// Returns the bytes of the remote object the key maps to.
	///
	/// The first call for a key reads the remote store and keeps a local copy, later calls
	/// are served from that copy. `Ok(None)` means the remote object does not exist.
	pub async fn get(&self, dataset_id: &str, tile: &T) -> Result<Option<Blob>, CacheError> {
		let path = self.remote_path(dataset_id, tile)?;
		self.inner.coordinator.fetch(&path).await
	}

	/// Removes the local copy of one key, so the next `get` reads the remote store again.
	pub fn invalidate(&self, dataset_id: &str, tile: &T) -> Result<(), CacheError> {
		let id = self.cache_id(dataset_id, tile)?;
		log::debug!("invalidating {id} of dataset '{dataset_id}', tile {tile:?}");
		self.inner.coordinator.local().delete(&id)
	}

	/// Removes every local copy of this cache.
	pub fn invalidate_all(&self) -> Result<(), CacheError> {
		log::debug!("invalidating all entries of namespace '{}'", self.namespace());
		self.inner.coordinator.local().clear()
	}

	/// The remote path the key maps to, checked to stay below the backing URI.
	pub fn remote_path(&self, dataset_id: &str, tile: &T) -> Result<String, CacheError> {
		self
			.inner
			.scheme
			.resolve(dataset_id, tile)
			.and_then(|path| {
				validate_remote_path(&path)?;
				Ok(path)
			})
			.map_err(|source| CacheError::Scheme {
				dataset: dataset_id.to_string(),
				tile: format!("{tile:?}"),
				source,
			})
	}

	pub fn cache_id(&self, dataset_id: &str, tile: &T) -> Result<CacheId, CacheError> {
		let path = self.remote_path(dataset_id, tile)?;
		Ok(self.inner.coordinator.cache_id(&path))
	}

	/// Ids of all entries currently published in the cache root.
	pub fn entries(&self) -> Result<Vec<CacheId>, CacheError> {
		self.inner.coordinator.local().entries()
	}

	pub fn namespace(&self) -> &str {
		self.inner.coordinator.namespace()
	}

	pub fn backing_uri(&self) -> &str {
		&self.inner.backing_uri
	}

	pub fn cache_root(&self) -> &Path {
		self.inner.coordinator.local().root()
	}

	pub fn stats(&self) -> CacheStatsSnapshot {
		self.inner.coordinator.stats().snapshot()
	}
}

impl<T> Clone for TileFileCache<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> Debug for TileFileCache<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TileFileCache")
			.field("backing_uri", &self.inner.backing_uri)
			.field("namespace", &self.inner.coordinator.namespace())
			.field("scheme", &self.inner.scheme)
			.field("root", &self.inner.coordinator.local().root())
			.finish()
	}
}

/// Builder for [`TileFileCache`], created by [`TileFileCache::builder`].
pub struct TileFileCacheBuilder<T> {
	backing_uri: String,
	scheme: Arc<dyn PathScheme<T>>,
	namespace: Option<String>,
	store_config: StoreConfig,
	cache_config: CacheConfig,
	remote_store: Option<Arc<dyn RemoteStore>>,
}

impl<T: Debug + 'static> TileFileCacheBuilder<T> {
	/// Defaults to [`DEFAULT_NAMESPACE`].
	pub fn namespace(mut self, namespace: &str) -> Self {
		self.namespace = Some(namespace.to_string());
		self
	}

	/// Settings passed verbatim to the remote store, e.g. `http.timeout_seconds`.
	pub fn store_config(mut self, store_config: StoreConfig) -> Self {
		self.store_config = store_config;
		self
	}

	pub fn cache_config(mut self, cache_config: CacheConfig) -> Self {
		self.cache_config = cache_config;
		self
	}

	/// Shorthand for setting [`CacheConfig::cache_dir`].
	pub fn cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
		self.cache_config.cache_dir = Some(cache_dir.into());
		self
	}

	/// Uses `remote_store` instead of opening one for the backing URI.
	///
	/// The backing URI still names the cache root.
	pub fn remote_store(mut self, remote_store: Arc<dyn RemoteStore>) -> Self {
		self.remote_store = Some(remote_store);
		self
	}

	pub fn build(self) -> Result<TileFileCache<T>, CacheError> {
		let backing_uri = normalize_backing_uri(&self.backing_uri).map_err(CacheError::Config)?;
		let namespace = self.namespace.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

		let remote = match self.remote_store {
			Some(remote) => remote,
			None => open_remote_store(&backing_uri, &self.store_config).map_err(CacheError::Config)?,
		};

		let root = self.cache_config.cache_dir().join(cache_root_name(&namespace, &backing_uri));
		let local = LocalStore::new(root);
		if let Err(err) = local.sweep_stale_temp_files(self.cache_config.stale_temp_age()) {
			log::warn!("could not remove stale temporary files: {err}");
		}

		log::debug!(
			"opened cache for '{backing_uri}' in namespace '{namespace}' at {:?}",
			local.root()
		);

		Ok(TileFileCache {
			inner: Arc::new(Inner {
				backing_uri,
				scheme: self.scheme,
				coordinator: FetchCoordinator::new(namespace, remote, local),
			}),
		})
	}
}

/// `/data/atlas`, `file:///data/atlas` and `file:///data/atlas/` all name the same root.
fn normalize_backing_uri(uri: &str) -> Result<String> {
	let mut url = parse_backing_uri(uri)?;
	if !url.cannot_be_a_base() && !url.path().ends_with('/') {
		let path = format!("{}/", url.path());
		url.set_path(&path);
	}
	Ok(url.to_string())
}
