//! On-disk store for cache entries.
//!
//! `LocalStore` owns one cache root directory. Every entry is a single file named by
//! its [`CacheId`] and holding the raw bytes of the remote object, without any header.
//!
//! Entries are published by writing a `.tmp-<uuid>` file inside the root and renaming it
//! onto the entry name. Rename is atomic within a directory, so a concurrent reader, in
//! this or in another process, either finds no entry or the complete one. Temporary files
//! never match the 64-hex entry pattern and are therefore never served. Files abandoned by
//! a crashed writer are removed by [`LocalStore::sweep_stale_temp_files`].

use super::CacheId;
use crate::{Blob, error::CacheError};
use std::{
	fmt::Debug,
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
	time::{Duration, SystemTime},
};
use uuid::Uuid;

const TEMP_PREFIX: &str = ".tmp-";

type LocalResult<T> = Result<T, CacheError>;

pub struct LocalStore {
	root: PathBuf,
}

impl LocalStore {
	/// Creates a store rooted at `root`. The directory is created lazily on first publish.
	pub fn new(root: PathBuf) -> Self {
		Self { root }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn entry_path(&self, id: &CacheId) -> PathBuf {
		self.root.join(id.as_str())
	}

	pub fn exists(&self, id: &CacheId) -> bool {
		self.entry_path(id).is_file()
	}

	/// Reads an entry. A missing entry is `Ok(None)`, including one deleted after `exists`.
	pub fn read(&self, id: &CacheId) -> LocalResult<Option<Blob>> {
		let path = self.entry_path(id);
		match fs::read(&path) {
			Ok(data) => Ok(Some(Blob::from(data))),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(CacheError::local_io(path, e)),
		}
	}

	/// Durably writes `blob` as the entry `id`, replacing an existing entry.
	pub fn publish(&self, id: &CacheId, blob: &Blob) -> LocalResult<()> {
		fs::create_dir_all(&self.root).map_err(|e| CacheError::local_io(&self.root, e))?;

		let temp_path = self.root.join(format!("{TEMP_PREFIX}{}", Uuid::new_v4().simple()));
		let entry_path = self.entry_path(id);

		let result = write_synced(&temp_path, blob.as_slice())
			.map_err(|e| CacheError::local_io(&temp_path, e))
			.and_then(|()| fs::rename(&temp_path, &entry_path).map_err(|e| CacheError::local_io(&entry_path, e)));

		if result.is_err() {
			fs::remove_file(&temp_path).ok();
		} else {
			log::debug!("published {} bytes to {entry_path:?}", blob.len());
		}
		result
	}

	/// Removes one entry. Removing a missing entry is not an error.
	pub fn delete(&self, id: &CacheId) -> LocalResult<()> {
		let path = self.entry_path(id);
		match fs::remove_file(&path) {
			Ok(()) => {
				log::debug!("deleted cache entry {path:?}");
				Ok(())
			}
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(CacheError::local_io(path, e)),
		}
	}

	/// Removes the whole root directory with every entry in it.
	pub fn clear(&self) -> LocalResult<()> {
		match fs::remove_dir_all(&self.root) {
			Ok(()) => {
				log::debug!("removed cache root {:?}", self.root);
				Ok(())
			}
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(CacheError::local_io(&self.root, e)),
		}
	}

	/// Lists published entries, skipping temporary and foreign files.
	pub fn entries(&self) -> LocalResult<Vec<CacheId>> {
		let dir = match fs::read_dir(&self.root) {
			Ok(dir) => dir,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
			Err(e) => return Err(CacheError::local_io(&self.root, e)),
		};
		let mut ids = Vec::new();
		for entry in dir {
			let entry = entry.map_err(|e| CacheError::local_io(&self.root, e))?;
			if let Some(id) = entry.file_name().to_str().and_then(CacheId::from_file_name) {
				ids.push(id);
			}
		}
		ids.sort();
		Ok(ids)
	}

	/// Deletes temporary files older than `max_age` and returns how many were removed.
	///
	/// Younger temporary files may belong to a writer that is still running.
	pub fn sweep_stale_temp_files(&self, max_age: Duration) -> LocalResult<usize> {
		let dir = match fs::read_dir(&self.root) {
			Ok(dir) => dir,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
			Err(e) => return Err(CacheError::local_io(&self.root, e)),
		};
		let now = SystemTime::now();
		let mut removed = 0;
		for entry in dir {
			let entry = entry.map_err(|e| CacheError::local_io(&self.root, e))?;
			let is_temp = entry.file_name().to_str().is_some_and(|n| n.starts_with(TEMP_PREFIX));
			if !is_temp {
				continue;
			}
			let path = entry.path();
			let modified = entry
				.metadata()
				.and_then(|m| m.modified())
				.map_err(|e| CacheError::local_io(&path, e))?;
			let age = now.duration_since(modified).unwrap_or_default();
			if age >= max_age {
				match fs::remove_file(&path) {
					Ok(()) => removed += 1,
					Err(e) if e.kind() == ErrorKind::NotFound => {}
					Err(e) => return Err(CacheError::local_io(path, e)),
				}
			}
		}
		if removed > 0 {
			log::debug!("removed {removed} stale temporary files from {:?}", self.root);
		}
		Ok(removed)
	}
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
	let mut file = File::create_new(path)?;
	file.write_all(data)?;
	file.sync_all()
}

impl Debug for LocalStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LocalStore").field("root", &self.root).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;
	use wildmatch::WildMatch;

	fn new_store() -> (TempDir, LocalStore) {
		let dir = tempfile::tempdir().expect("tempdir");
		let store = LocalStore::new(dir.path().join("ns-test"));
		(dir, store)
	}

	fn id(path: &str) -> CacheId {
		CacheId::resolve("test", path)
	}

	fn dir_names(store: &LocalStore) -> Vec<String> {
		let mut names: Vec<String> = fs::read_dir(store.root())
			.unwrap()
			.map(|e| e.unwrap().file_name().to_string_lossy().to_string())
			.collect();
		names.sort();
		names
	}

	#[test]
	fn publish_read_delete_flow() {
		let (_tmp, store) = new_store();
		let a = id("AAA/1/AAA_1-1-1.atlas");

		assert!(!store.exists(&a));
		assert_eq!(store.read(&a).unwrap(), None);
		assert!(!store.root().exists(), "root is created lazily");

		store.publish(&a, &Blob::from(&[0, 255, 7])).unwrap();
		assert!(store.exists(&a));
		assert_eq!(store.read(&a).unwrap(), Some(Blob::from(&[0, 255, 7])));
		assert_eq!(fs::read(store.entry_path(&a)).unwrap(), vec![0, 255, 7], "raw bytes, no header");
		assert_eq!(dir_names(&store), vec![a.to_string()], "no temporary files left behind");

		store.delete(&a).unwrap();
		assert!(!store.exists(&a));
		store.delete(&a).unwrap();
	}

	#[test]
	fn publish_replaces_existing_entry() {
		let (_tmp, store) = new_store();
		let a = id("AAA/1/AAA_1-1-1.atlas");
		store.publish(&a, &Blob::from("old")).unwrap();
		store.publish(&a, &Blob::from("new")).unwrap();
		assert_eq!(store.read(&a).unwrap(), Some(Blob::from("new")));
		assert_eq!(store.entries().unwrap(), vec![a]);
	}

	#[test]
	fn clear_removes_root_until_next_publish() {
		let (_tmp, store) = new_store();
		let a = id("a");
		let b = id("b");
		store.publish(&a, &Blob::from("a")).unwrap();
		store.publish(&b, &Blob::from("b")).unwrap();
		assert_eq!(store.entries().unwrap().len(), 2);

		store.clear().unwrap();
		assert!(!store.root().exists());
		assert!(store.entries().unwrap().is_empty());
		store.clear().unwrap();

		store.publish(&a, &Blob::from("again")).unwrap();
		assert_eq!(store.read(&a).unwrap(), Some(Blob::from("again")));
		assert!(!store.exists(&b));
	}

	#[test]
	fn temporary_files_are_never_entries() {
		let (_tmp, store) = new_store();
		fs::create_dir_all(store.root()).unwrap();
		let abandoned = store.root().join(".tmp-abandoned");
		fs::write(&abandoned, b"partial").unwrap();
		fs::write(store.root().join("README"), b"foreign").unwrap();

		assert!(store.entries().unwrap().is_empty());
		assert!(WildMatch::new(".tmp-*").matches(&abandoned.file_name().unwrap().to_string_lossy()));
	}

	#[test]
	fn sweep_respects_age() {
		let (_tmp, store) = new_store();
		assert_eq!(store.sweep_stale_temp_files(Duration::ZERO).unwrap(), 0, "missing root");

		store.publish(&id("kept"), &Blob::from("entry")).unwrap();
		fs::write(store.root().join(".tmp-crashed"), b"partial").unwrap();

		assert_eq!(store.sweep_stale_temp_files(Duration::from_secs(3600)).unwrap(), 0);
		assert_eq!(store.sweep_stale_temp_files(Duration::ZERO).unwrap(), 1);
		assert_eq!(dir_names(&store), vec![id("kept").to_string()]);
	}

	#[test]
	fn publish_failure_is_local_io() {
		let (tmp, _store) = new_store();
		// a regular file where the root directory should be
		let blocker = tmp.path().join("blocker");
		fs::write(&blocker, b"x").unwrap();
		let store = LocalStore::new(blocker.join("ns-test"));
		let err = store.publish(&id("a"), &Blob::from("a")).unwrap_err();
		assert!(err.is_local_io(), "{err:?}");
	}
}
