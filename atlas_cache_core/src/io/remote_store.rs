//! This module defines the [`RemoteStore`] trait.
//!
//! # Examples
//!
//! ```rust
//! use atlas_cache_core::{Blob, io::RemoteStore};
//! use anyhow::{Result, bail};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! struct SingleFileStore {
//!     path: String,
//!     data: Vec<u8>,
//! }
//!
//! #[async_trait]
//! impl RemoteStore for SingleFileStore {
//!     async fn exists(&self, path: &str) -> Result<bool> {
//!         Ok(path == self.path)
//!     }
//!
//!     async fn read(&self, path: &str) -> Result<Blob> {
//!         if path != self.path {
//!             bail!("no such object '{path}'");
//!         }
//!         Ok(Blob::from(self.data.clone()))
//!     }
//!
//!     fn get_name(&self) -> &str {
//!         "single-file"
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = SingleFileStore { path: "AAA/1/AAA_1-1-1.atlas".into(), data: vec![1, 2, 3] };
//!     assert!(store.exists("AAA/1/AAA_1-1-1.atlas").await?);
//!     assert!(!store.exists("AAA/5/AAA_5-5-5.atlas").await?);
//!     assert_eq!(store.read("AAA/1/AAA_1-1-1.atlas").await?.as_slice(), &[1, 2, 3]);
//!     Ok(())
//! }
//! ```

use crate::Blob;
use anyhow::Result;
use async_trait::async_trait;
use std::{collections::HashMap, fmt::Debug};

/// Free-form settings for a remote store (credentials, timeouts, headers, ...).
///
/// The cache passes this map through untouched. Only the store implementation reads it.
pub type StoreConfig = HashMap<String, String>;

/// Read-only view of a remote store rooted at some URI.
#[async_trait]
pub trait RemoteStore: Debug + Send + Sync {
	/// Checks whether an object exists at `path`, relative to the store root.
	///
	/// An absent object is `Ok(false)`. `Err` is reserved for failures to find out.
	async fn exists(&self, path: &str) -> Result<bool>;

	/// Reads the complete object at `path`, relative to the store root.
	async fn read(&self, path: &str) -> Result<Blob>;

	/// Name of the store, usually its root URI.
	fn get_name(&self) -> &str;
}
