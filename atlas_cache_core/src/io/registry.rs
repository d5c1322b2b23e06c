//! `RemoteStoreRegistry` opens a [`RemoteStore`] for a backing URI by looking up its scheme.
//!
//! # Example Usage
//!
//! ```rust
//! use atlas_cache_core::io::{RemoteStoreRegistry, StoreConfig};
//!
//! let registry = RemoteStoreRegistry::default();
//! let store = registry.open("https://example.org/atlas", &StoreConfig::new()).unwrap();
//! assert_eq!(store.get_name(), "https://example.org/atlas/");
//! assert!(registry.open("s3://bucket/atlas", &StoreConfig::new()).is_err());
//! ```

use super::{RemoteStore, RemoteStoreFile, RemoteStoreHttp, StoreConfig};
use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use std::{collections::HashMap, path::Path, sync::Arc};

type OpenStore = Box<dyn Fn(Url, &StoreConfig) -> Result<Arc<dyn RemoteStore>> + Send + Sync + 'static>;

/// Registry mapping URI schemes to remote store openers.
#[derive(Clone)]
pub struct RemoteStoreRegistry {
	openers: HashMap<String, Arc<OpenStore>>,
}

impl RemoteStoreRegistry {
	/// Creates a registry without any registered schemes.
	pub fn new_empty() -> Self {
		Self {
			openers: HashMap::new(),
		}
	}

	/// Register an opener for a URI scheme, replacing a previous one.
	///
	/// # Arguments
	/// * `scheme` - The URI scheme, e.g. `"s3"`.
	/// * `open` - Function that builds a store from the root URL and the store config.
	pub fn register<F>(&mut self, scheme: &str, open: F)
	where
		F: Fn(Url, &StoreConfig) -> Result<Arc<dyn RemoteStore>> + Send + Sync + 'static,
	{
		self
			.openers
			.insert(scheme.to_ascii_lowercase(), Arc::new(Box::new(open)));
	}

	pub fn supports_scheme(&self, scheme: &str) -> bool {
		self.openers.contains_key(&scheme.to_ascii_lowercase())
	}

	/// Opens the store for `uri`.
	///
	/// An absolute filesystem path is accepted as shorthand for a `file://` URI.
	pub fn open(&self, uri: &str, config: &StoreConfig) -> Result<Arc<dyn RemoteStore>> {
		let url = parse_backing_uri(uri)?;
		let scheme = url.scheme().to_ascii_lowercase();
		let open = self
			.openers
			.get(&scheme)
			.ok_or_else(|| anyhow!("no remote store registered for scheme '{scheme}' of '{uri}'"))?;
		open(url, config).with_context(|| format!("failed to open remote store '{uri}'"))
	}
}

/// Opens `uri` with the default registry (`file`, `http`, `https` and absolute paths).
pub fn open_remote_store(uri: &str, config: &StoreConfig) -> Result<Arc<dyn RemoteStore>> {
	RemoteStoreRegistry::default().open(uri, config)
}

/// Parses a backing URI, turning absolute filesystem paths into `file://` URLs.
pub fn parse_backing_uri(uri: &str) -> Result<Url> {
	let path = Path::new(uri);
	if path.is_absolute() {
		return Url::from_directory_path(path).map_err(|()| anyhow!("cannot convert path '{uri}' into a file URL"));
	}
	Url::parse(uri).with_context(|| format!("'{uri}' is neither an absolute path nor a URI"))
}

impl Default for RemoteStoreRegistry {
	fn default() -> Self {
		let mut reg = Self::new_empty();

		reg.register("file", |url, _config| Ok(Arc::new(RemoteStoreFile::from_url(&url)?)));
		reg.register("http", |url, config| Ok(Arc::new(RemoteStoreHttp::from_url(url, config)?)));
		reg.register("https", |url, config| Ok(Arc::new(RemoteStoreHttp::from_url(url, config)?)));

		reg
	}
}
