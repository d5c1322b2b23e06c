//! The [`Blob`] byte buffer handed out by the cache.
//!
//! The cache never looks inside a [`Blob`]: atlas shards are moved verbatim from the remote
//! store to disk and back.
//!
//! ```rust
//! use atlas_cache_core::Blob;
//!
//! let blob = Blob::from("atlas");
//! assert_eq!(blob.len(), 5);
//! assert_eq!(blob.as_slice(), b"atlas");
//! assert_eq!(blob.into_vec(), b"atlas".to_vec());
//! ```

use std::fmt::Debug;
use std::str::Utf8Error;

/// An owned, immutable-by-convention sequence of bytes.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`.
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Borrows the raw bytes.
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	/// Consumes the `Blob` and returns the underlying vector.
	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Interprets the bytes as UTF-8.
	///
	/// ```rust
	/// use atlas_cache_core::Blob;
	///
	/// assert_eq!(Blob::from("Xylofön").as_str().unwrap(), "Xylofön");
	/// assert!(Blob::from(&[0xff, 0xfe]).as_str().is_err());
	/// ```
	pub fn as_str(&self) -> Result<&str, Utf8Error> {
		std::str::from_utf8(&self.0)
	}

	/// Number of bytes.
	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(item: &str) -> Self {
		Blob(item.as_bytes().to_vec())
	}
}

impl From<String> for Blob {
	fn from(item: String) -> Self {
		Blob(item.into_bytes())
	}
}

impl AsRef<[u8]> for Blob {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl Debug for Blob {
	/// Prints the length and at most the first 16 bytes, shards can be megabytes.
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let head = &self.0[..self.0.len().min(16)];
		let hex = head.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ");
		if self.0.len() > 16 {
			write!(f, "Blob({} bytes: {hex} ...)", self.0.len())
		} else {
			write!(f, "Blob({} bytes: {hex})", self.0.len())
		}
	}
}
