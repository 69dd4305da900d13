//! Per-argument topology graphs.

mod geometry;

pub use geometry::GeometryGraph;
