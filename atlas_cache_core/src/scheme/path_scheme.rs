use anyhow::{Result, ensure};
use std::{fmt::Debug, sync::Arc};

/// Maps a dataset id and a tile of type `T` to a path relative to the backing URI.
///
/// Implementations must be pure: the same key always yields the same path, and two
/// different keys never yield the same path.
pub trait PathScheme<T>: Debug + Send + Sync {
	fn resolve(&self, dataset_id: &str, tile: &T) -> Result<String>;
}

impl<T, S: PathScheme<T> + ?Sized> PathScheme<T> for Arc<S> {
	fn resolve(&self, dataset_id: &str, tile: &T) -> Result<String> {
		(**self).resolve(dataset_id, tile)
	}
}

/// Rejects dataset ids that cannot be used as a single path segment.
pub fn validate_dataset_id(dataset_id: &str) -> Result<()> {
	ensure!(!dataset_id.is_empty(), "dataset id must not be empty");
	ensure!(
		!dataset_id.contains(['/', '\\']) && dataset_id != "." && dataset_id != "..",
		"dataset id '{dataset_id}' must be a single path segment"
	);
	Ok(())
}

/// Checks that a scheme produced a relative path that stays below the backing root.
pub fn validate_remote_path(path: &str) -> Result<()> {
	ensure!(!path.is_empty(), "remote path must not be empty");
	ensure!(!path.starts_with('/'), "remote path '{path}' must be relative");
	ensure!(
		path.split('/').all(|segment| !segment.is_empty() && segment != "." && segment != ".."),
		"remote path '{path}' must not contain empty, '.' or '..' segments"
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("AAA", true)]
	#[case("DEU_north", true)]
	#[case("", false)]
	#[case("A/B", false)]
	#[case("A\\B", false)]
	#[case("..", false)]
	fn dataset_ids(#[case] id: &str, #[case] valid: bool) {
		assert_eq!(validate_dataset_id(id).is_ok(), valid);
	}

	#[rstest]
	#[case("AAA/1/AAA_1-1-1.atlas", true)]
	#[case("a", true)]
	#[case("", false)]
	#[case("/AAA/1", false)]
	#[case("AAA//1", false)]
	#[case("AAA/../1", false)]
	#[case("./AAA", false)]
	fn remote_paths(#[case] path: &str, #[case] valid: bool) {
		assert_eq!(validate_remote_path(path).is_ok(), valid);
	}
}
