//! The cache itself: entry naming, on-disk storage, fetch deduplication and the facade.
//!
//! Most users only need [`TileFileCache`]. The lower layers are public so that other
//! front ends can reuse them.

mod fetch;
mod identifier;
mod inflight;
mod local_store;
mod stats;
mod tile_file_cache;

pub use fetch::*;
pub use identifier::*;
pub use inflight::*;
pub use local_store::*;
pub use stats::*;
pub use tile_file_cache::*;

/// Namespace used when the caller does not choose one.
pub const DEFAULT_NAMESPACE: &str = "__atlas_cache_global_namespace__";
