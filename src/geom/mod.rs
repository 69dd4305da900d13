mod build;
mod dimension;
pub(crate) mod envelope;

pub use build::{build_geometry, components, empty_of_dimension, normalize, polygons};
pub use dimension::{Dimension, boundary_dimension, dimension};
