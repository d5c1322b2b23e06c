//! In-memory remote store for tests.
//!
//! [`RemoteStoreMock`] keeps objects in a map, counts every `exists` and `read` call and
//! can be told to fail or to stall, which makes cache hits, misses and deduplication
//! observable from the outside.

use crate::{Blob, io::RemoteStore};
use anyhow::{Result, bail};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{
	collections::{HashMap, HashSet},
	sync::atomic::{AtomicUsize, Ordering},
	time::Duration,
};

#[derive(Debug, Default)]
pub struct RemoteStoreMock {
	objects: Mutex<HashMap<String, Blob>>,
	failing: Mutex<HashSet<String>>,
	read_delay: Mutex<Option<Duration>>,
	exists_calls: AtomicUsize,
	read_calls: AtomicUsize,
}

impl RemoteStoreMock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores (or replaces) the object at `path`.
	pub fn put(&self, path: &str, data: impl Into<Blob>) {
		self.objects.lock().insert(path.to_string(), data.into());
	}

	pub fn remove(&self, path: &str) {
		self.objects.lock().remove(path);
	}

	/// Makes every `exists` and `read` for `path` fail, as a broken connection would.
	pub fn fail_on(&self, path: &str) {
		self.failing.lock().insert(path.to_string());
	}

	pub fn heal(&self, path: &str) {
		self.failing.lock().remove(path);
	}

	/// Delays every `read` by `delay`.
	pub fn set_read_delay(&self, delay: Option<Duration>) {
		*self.read_delay.lock() = delay;
	}

	pub fn exists_calls(&self) -> usize {
		self.exists_calls.load(Ordering::SeqCst)
	}

	pub fn read_calls(&self) -> usize {
		self.read_calls.load(Ordering::SeqCst)
	}

	fn check_failing(&self, path: &str) -> Result<()> {
		if self.failing.lock().contains(path) {
			bail!("simulated transfer failure for '{path}'");
		}
		Ok(())
	}
}

#[async_trait]
impl RemoteStore for RemoteStoreMock {
	async fn exists(&self, path: &str) -> Result<bool> {
		self.exists_calls.fetch_add(1, Ordering::SeqCst);
		self.check_failing(path)?;
		Ok(self.objects.lock().contains_key(path))
	}

	async fn read(&self, path: &str) -> Result<Blob> {
		self.read_calls.fetch_add(1, Ordering::SeqCst);
		let delay = *self.read_delay.lock();
		if let Some(delay) = delay {
			tokio::time::sleep(delay).await;
		}
		self.check_failing(path)?;
		match self.objects.lock().get(path) {
			Some(blob) => Ok(blob.clone()),
			None => bail!("object '{path}' does not exist"),
		}
	}

	fn get_name(&self) -> &str {
		"mock://"
	}
}
