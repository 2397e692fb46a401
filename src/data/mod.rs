mod geojson;
mod loader;

pub use loader::{load_atlas, parse_atlas, LoadError};
