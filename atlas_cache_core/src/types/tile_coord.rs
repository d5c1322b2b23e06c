//! Slippy-map tile coordinates used by the shipped path schemes.
//!
//! ```
//! use atlas_cache_core::TileCoord;
//!
//! let coord = TileCoord::new(5, 6, 7).unwrap();
//! assert_eq!(coord.to_string(), "5/6/7");
//! assert_eq!("5-6-7".parse::<TileCoord>().unwrap(), coord);
//! ```

use anyhow::{Context, Error, Result, ensure};
use std::{
	fmt::{self, Debug, Display},
	str::FromStr,
};

/// A tile in a slippy-map pyramid: zoom `level` plus `x`/`y` indices.
///
/// Ordered by level, then x, then y.
#[derive(Eq, PartialEq, Clone, Hash, Copy, PartialOrd, Ord)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The x index of the tile.
	pub x: u32,
	/// The y index of the tile.
	pub y: u32,
}

impl TileCoord {
	/// Create a new `TileCoord` at zoom `level` with indices `x`, `y`.
	///
	/// # Errors
	/// Returns an error if `level` > 31 or an index does not fit the level.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= 31, "level ({level}) must be <= 31");
		let max = 2u32.pow(u32::from(level));
		ensure!(x < max, "x ({x}) out of bounds for level {level}");
		ensure!(y < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// Largest valid x/y index at this level.
	#[must_use]
	pub fn max_index(&self) -> u32 {
		2u32.pow(u32::from(self.level)) - 1
	}
}

impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.level, self.x, self.y)
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}

impl FromStr for TileCoord {
	type Err = Error;

	/// Parses `z/x/y` or `z-x-y`.
	fn from_str(s: &str) -> Result<Self> {
		let parts: Vec<&str> = s.trim().split(['/', '-']).collect();
		ensure!(parts.len() == 3, "tile '{s}' must have the form 'z/x/y' or 'z-x-y'");
		let level = parts[0].parse::<u8>().with_context(|| format!("invalid level in tile '{s}'"))?;
		let x = parts[1].parse::<u32>().with_context(|| format!("invalid x in tile '{s}'"))?;
		let y = parts[2].parse::<u32>().with_context(|| format!("invalid y in tile '{s}'"))?;
		TileCoord::new(level, x, y)
	}
}
