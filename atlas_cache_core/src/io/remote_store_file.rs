//! Remote store backed by a local (or locally mounted) directory.
//!
//! # Examples
//!
//! ```rust
//! use atlas_cache_core::io::{RemoteStore, RemoteStoreFile};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let dir = tempfile::tempdir()?;
//!     std::fs::create_dir_all(dir.path().join("AAA/1"))?;
//!     std::fs::write(dir.path().join("AAA/1/AAA_1-1-1.atlas"), b"atlas")?;
//!
//!     let store = RemoteStoreFile::open(dir.path())?;
//!     assert!(store.exists("AAA/1/AAA_1-1-1.atlas").await?);
//!     assert_eq!(store.read("AAA/1/AAA_1-1-1.atlas").await?.as_slice(), b"atlas");
//!     Ok(())
//! }
//! ```

use super::RemoteStore;
use crate::Blob;
use anyhow::{Context, Result, anyhow, ensure};
use async_trait::async_trait;
use reqwest::Url;
use std::{
	fs,
	path::{Component, Path, PathBuf},
};

/// A [`RemoteStore`] reading from a directory tree.
#[derive(Debug)]
pub struct RemoteStoreFile {
	name: String,
	root: PathBuf,
}

impl RemoteStoreFile {
	/// Opens a store rooted at the absolute directory `root`.
	///
	/// The directory does not have to exist yet, datasets may appear later.
	pub fn open(root: &Path) -> Result<RemoteStoreFile> {
		ensure!(root.is_absolute(), "root {root:?} must be absolute");
		ensure!(!root.is_file(), "root {root:?} must be a directory, not a file");
		Ok(RemoteStoreFile {
			name: format!("file://{}", root.to_string_lossy()),
			root: root.to_path_buf(),
		})
	}

	/// Opens a store from a `file://` URL.
	pub fn from_url(url: &Url) -> Result<RemoteStoreFile> {
		ensure!(url.scheme() == "file", "expected a 'file' URL, got '{url}'");
		let root = url
			.to_file_path()
			.map_err(|()| anyhow!("URL '{url}' does not denote a local path"))?;
		Self::open(&root)
	}

	fn object_path(&self, path: &str) -> Result<PathBuf> {
		let relative = Path::new(path);
		ensure!(
			relative.components().all(|c| matches!(c, Component::Normal(_))),
			"path '{path}' must be relative and must not leave the store root"
		);
		Ok(self.root.join(relative))
	}
}

#[async_trait]
impl RemoteStore for RemoteStoreFile {
	async fn exists(&self, path: &str) -> Result<bool> {
		let full = self.object_path(path)?;
		match fs::metadata(&full) {
			Ok(meta) => Ok(meta.is_file()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
			Err(e) => Err(e).with_context(|| format!("failed to stat {full:?}")),
		}
	}

	async fn read(&self, path: &str) -> Result<Blob> {
		let full = self.object_path(path)?;
		let data = fs::read(&full).with_context(|| format!("failed to read {full:?}"))?;
		Ok(Blob::from(data))
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}
