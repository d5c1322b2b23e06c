use super::PathScheme;
use anyhow::Result;
use std::{fmt::Debug, marker::PhantomData};

/// A [`PathScheme`] backed by a closure.
///
/// ```rust
/// use atlas_cache_core::scheme::{FnScheme, PathScheme};
///
/// let scheme = FnScheme::new("by-name", |dataset: &str, shard: &u32| Ok(format!("{dataset}/shard-{shard}.bin")));
/// assert_eq!(scheme.resolve("AAA", &7).unwrap(), "AAA/shard-7.bin");
/// ```
pub struct FnScheme<T, F> {
	name: String,
	resolve: F,
	_marker: PhantomData<fn(&T)>,
}

impl<T, F> FnScheme<T, F>
where
	F: Fn(&str, &T) -> Result<String> + Send + Sync,
{
	pub fn new(name: &str, resolve: F) -> Self {
		Self {
			name: name.to_string(),
			resolve,
			_marker: PhantomData,
		}
	}
}

impl<T, F> PathScheme<T> for FnScheme<T, F>
where
	F: Fn(&str, &T) -> Result<String> + Send + Sync,
{
	fn resolve(&self, dataset_id: &str, tile: &T) -> Result<String> {
		(self.resolve)(dataset_id, tile)
	}
}

impl<T, F> Debug for FnScheme<T, F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FnScheme").field("name", &self.name).finish()
	}
}
