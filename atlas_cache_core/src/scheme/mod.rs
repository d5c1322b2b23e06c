//! Path schemes: strategies that turn a `(dataset, tile)` key into a remote relative path.
//!
//! The cache never hardcodes a naming layout. It asks the [`PathScheme`] it was built with.
//! Shipped strategies:
//! - [`SlippyTileScheme`] for [`TileCoord`](crate::TileCoord) keys, with presets and templates,
//! - [`FnScheme`] turning any closure into a scheme.

mod fn_scheme;
mod path_scheme;
mod slippy_tile_scheme;

pub use fn_scheme::*;
pub use path_scheme::*;
pub use slippy_tile_scheme::*;
