//! Per-entry fetch markers.
//!
//! At most one task may run the miss path for a given [`CacheId`]. The table only holds
//! its shard lock while finding or inserting the marker. The wait for the marker itself
//! happens on a per-id async mutex, so unrelated ids never wait on each other.

use super::CacheId;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct InflightTable {
	markers: DashMap<CacheId, Arc<Mutex<()>>>,
}

impl InflightTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Waits until no other task holds the marker for `id`, then takes it.
	pub async fn acquire(&self, id: &CacheId) -> InflightGuard<'_> {
		let marker = Arc::clone(self.markers.entry(id.clone()).or_default().value());
		let guard = marker.lock_owned().await;
		InflightGuard {
			table: self,
			id: id.clone(),
			guard: Some(guard),
		}
	}

	/// Number of ids that currently have a marker, held or awaited.
	pub fn len(&self) -> usize {
		self.markers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.markers.is_empty()
	}
}

/// Holds the marker of one id. Dropping it lets the next waiter in.
#[derive(Debug)]
pub struct InflightGuard<'a> {
	table: &'a InflightTable,
	id: CacheId,
	guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for InflightGuard<'_> {
	fn drop(&mut self) {
		drop(self.guard.take());
		// Waiters hold their own clone of the marker, so a count of one means only the
		// table still references it.
		self.table.markers.remove_if(&self.id, |_, marker| Arc::strong_count(marker) == 1);
	}
}
