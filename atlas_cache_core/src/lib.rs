//! Local-disk cache for sharded atlas tile files held in a remote, read-only store.
//!
//! The crate is split into small building blocks:
//! - [`types`]: [`Blob`] byte buffers and slippy-map [`TileCoord`]s,
//! - [`io`]: the [`RemoteStore`](io::RemoteStore) adapter trait with file and HTTP implementations,
//! - [`scheme`]: [`PathScheme`](scheme::PathScheme) strategies mapping `(dataset, tile)` to a remote path,
//! - [`cache`]: key resolution, the local store, fetch deduplication and the [`TileFileCache`] facade,
//! - [`config`]: local cache settings.
//!
//! # Quick start
//! ```rust
//! use atlas_cache_core::{TileCoord, TileFileCache, scheme::{SlippyTileScheme, SlippyTileSchemeType}};
//! use std::{collections::HashMap, sync::Arc};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let remote = tempfile::tempdir()?;
//!     std::fs::create_dir_all(remote.path().join("AAA/1"))?;
//!     std::fs::write(remote.path().join("AAA/1/AAA_1-1-1.atlas"), b"shard")?;
//!
//!     let local = tempfile::tempdir()?;
//!     let scheme = Arc::new(SlippyTileScheme::new(SlippyTileSchemeType::ZzSubfolder));
//!     let cache = TileFileCache::<TileCoord>::builder(remote.path().to_str().unwrap(), scheme)
//!         .store_config(HashMap::new())
//!         .cache_dir(local.path())
//!         .build()?;
//!
//!     let blob = cache.get("AAA", &TileCoord::new(1, 1, 1)?).await?;
//!     assert_eq!(blob.unwrap().as_slice(), b"shard");
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod io;
pub mod scheme;
#[cfg(any(test, feature = "test"))]
pub mod testing;
pub mod types;

pub use cache::{CacheId, CacheStats, DEFAULT_NAMESPACE, TileFileCache, TileFileCacheBuilder};
pub use config::CacheConfig;
pub use error::CacheError;
pub use types::*;
