//! Read-only access to the remote store that holds the original atlas files.
//!
//! # Overview
//!
//! The cache only needs two things from a remote store: "does this path exist?" and
//! "give me all bytes at this path". [`RemoteStore`] captures exactly that. Paths passed to
//! a store are relative to the store's root URI, e.g. `AAA/1/AAA_1-1-1.atlas`.
//!
//! Shipped implementations:
//! - [`RemoteStoreFile`] for `file://` URIs and absolute local paths,
//! - [`RemoteStoreHttp`] for `http://` and `https://` URIs.
//!
//! [`RemoteStoreRegistry`] picks one by URI scheme and can be extended with custom openers.

mod registry;
mod remote_store;
mod remote_store_file;
mod remote_store_http;

pub use registry::*;
pub use remote_store::*;
pub use remote_store_file::*;
pub use remote_store_http::*;
