pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, Format, detect_format, load_world, parse_world};
pub use schema::{WorldFile, WorldSettings};

/// The "World 1" map shipped in `levels/`.
pub const BUNDLED_WORLD: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/levels/world1.ron");
