pub mod geojson;

pub use geojson::{from_geojson, read_geojson_bytes, to_geojson, write_geojson_bytes};
