//! Failure taxonomy of the cache.
//!
//! A tile that does not exist in the remote store is **not** an error: `get` returns
//! `Ok(None)` for it. Everything else surfaces as a [`CacheError`] so callers can tell the
//! kind of failure apart and decide whether to retry.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
	/// The path scheme could not turn the key into a remote path. No remote access happened.
	#[error("path scheme could not resolve dataset '{dataset}', tile {tile}")]
	Scheme {
		dataset: String,
		tile: String,
		#[source]
		source: anyhow::Error,
	},

	/// Checking or reading the remote object failed.
	#[error("transfer of '{path}' from the remote store failed")]
	Transfer {
		path: String,
		#[source]
		source: anyhow::Error,
	},

	/// A local filesystem operation on the cache directory failed.
	#[error("local cache operation on {path:?} failed")]
	LocalIo {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The cache could not be constructed from the given arguments.
	#[error("invalid cache configuration")]
	Config(#[source] anyhow::Error),
}

impl CacheError {
	pub(crate) fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		CacheError::LocalIo {
			path: path.into(),
			source,
		}
	}

	pub fn is_scheme(&self) -> bool {
		matches!(self, CacheError::Scheme { .. })
	}

	pub fn is_transfer(&self) -> bool {
		matches!(self, CacheError::Transfer { .. })
	}

	pub fn is_local_io(&self) -> bool {
		matches!(self, CacheError::LocalIo { .. })
	}
}
