use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing how a cache instance has been answering requests.
#[derive(Debug, Default)]
pub struct CacheStats {
	hits: AtomicU64,
	misses: AtomicU64,
	not_found: AtomicU64,
	remote_reads: AtomicU64,
}

/// A point-in-time copy of [`CacheStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
	/// Requests answered from the local store.
	pub hits: u64,
	/// Requests that had to consult the remote store.
	pub misses: u64,
	/// Misses for which the remote object did not exist.
	pub not_found: u64,
	/// Complete remote reads.
	pub remote_reads: u64,
}

impl CacheStats {
	pub(crate) fn record_hit(&self) {
		self.hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_miss(&self) {
		self.misses.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_not_found(&self) {
		self.not_found.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_remote_read(&self) {
		self.remote_reads.fetch_add(1, Ordering::Relaxed);
	}

	pub fn snapshot(&self) -> CacheStatsSnapshot {
		CacheStatsSnapshot {
			hits: self.hits.load(Ordering::Relaxed),
			misses: self.misses.load(Ordering::Relaxed),
			not_found: self.not_found.load(Ordering::Relaxed),
			remote_reads: self.remote_reads.load(Ordering::Relaxed),
		}
	}
}
