//! Collision-resistant names for cache entries and cache roots.
//!
//! A [`CacheId`] is the SHA-256 digest of the namespace and the remote path, each
//! length-prefixed so that no two distinct pairs feed the same bytes into the hash. Two
//! caches sharing a backing URI and a path scheme but using different namespaces therefore
//! never look at each other's entries.

use sha2::{Digest, Sha256};
use std::fmt::{self, Display};

/// Name of a single cache entry: 64 lowercase hex characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheId(String);

impl CacheId {
	/// Derives the id of the entry holding `remote_path` within `namespace`.
	pub fn resolve(namespace: &str, remote_path: &str) -> CacheId {
		let id = CacheId(digest_hex(&[namespace, remote_path]));
		log::trace!("resolved cache id {id} for '{remote_path}' in namespace '{namespace}'");
		id
	}

	/// Accepts `name` only if it has the shape of an entry file name.
	pub fn from_file_name(name: &str) -> Option<CacheId> {
		if name.len() == 64 && name.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)) {
			Some(CacheId(name.to_string()))
		} else {
			None
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for CacheId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Directory name owned by one `(namespace, backing URI)` pair below the cache directory.
pub fn cache_root_name(namespace: &str, backing_uri: &str) -> String {
	let digest = digest_hex(&[namespace, backing_uri]);
	format!("ns-{}", &digest[..16])
}

fn digest_hex(fields: &[&str]) -> String {
	let mut hasher = Sha256::new();
	for field in fields {
		hasher.update((field.len() as u64).to_le_bytes());
		hasher.update(field.as_bytes());
	}
	hex::encode(hasher.finalize())
}
