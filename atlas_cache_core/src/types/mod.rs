mod blob;
mod tile_coord;

pub use blob::*;
pub use tile_coord::*;
