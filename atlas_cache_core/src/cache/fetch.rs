//! The miss path: local lookup, deduplicated remote fetch, publication.

use super::{CacheId, CacheStats, InflightTable, LocalStore};
use crate::{Blob, error::CacheError, io::RemoteStore};
use std::sync::Arc;

#[derive(Debug)]
pub struct FetchCoordinator {
	namespace: String,
	remote: Arc<dyn RemoteStore>,
	local: LocalStore,
	inflight: InflightTable,
	stats: CacheStats,
}

impl FetchCoordinator {
	pub fn new(namespace: String, remote: Arc<dyn RemoteStore>, local: LocalStore) -> Self {
		Self {
			namespace,
			remote,
			local,
			inflight: InflightTable::new(),
			stats: CacheStats::default(),
		}
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn local(&self) -> &LocalStore {
		&self.local
	}

	pub fn remote(&self) -> &Arc<dyn RemoteStore> {
		&self.remote
	}

	pub fn stats(&self) -> &CacheStats {
		&self.stats
	}

	pub fn cache_id(&self, remote_path: &str) -> CacheId {
		CacheId::resolve(&self.namespace, remote_path)
	}

	/// Returns the bytes stored at `remote_path`, from the local store if possible.
	///
	/// `Ok(None)` means the remote object does not exist; nothing is cached in that case.
	/// Concurrent calls for the same path share a single remote read.
	pub async fn fetch(&self, remote_path: &str) -> Result<Option<Blob>, CacheError> {
		let id = self.cache_id(remote_path);

		if let Some(blob) = self.local_hit(&id, remote_path)? {
			return Ok(Some(blob));
		}

		let _marker = self.inflight.acquire(&id).await;

		// another task may have published the entry while we were waiting
		if let Some(blob) = self.local_hit(&id, remote_path)? {
			return Ok(Some(blob));
		}

		self.stats.record_miss();
		log::debug!("cache miss for '{remote_path}' ({id}), asking {}", self.remote.get_name());

		let exists = self.remote.exists(remote_path).await.map_err(|source| CacheError::Transfer {
			path: remote_path.to_string(),
			source,
		})?;
		if !exists {
			self.stats.record_not_found();
			log::debug!("'{remote_path}' does not exist in {}", self.remote.get_name());
			return Ok(None);
		}

		let blob = self.remote.read(remote_path).await.map_err(|source| CacheError::Transfer {
			path: remote_path.to_string(),
			source,
		})?;
		self.stats.record_remote_read();

		self.local.publish(&id, &blob)?;
		Ok(Some(blob))
	}

	fn local_hit(&self, id: &CacheId, remote_path: &str) -> Result<Option<Blob>, CacheError> {
		if !self.local.exists(id) {
			return Ok(None);
		}
		let blob = self.local.read(id)?;
		if blob.is_some() {
			self.stats.record_hit();
			log::debug!("cache hit for '{remote_path}' ({id})");
		}
		Ok(blob)
	}
}
