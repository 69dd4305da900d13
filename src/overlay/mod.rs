//! Boolean overlay of two geometries.

mod edge_ring;
mod line;
mod op;
mod point;
mod polygon;
pub mod snap;

pub use line::LineBuilder;
pub use op::{OpCode, OverlayOp, overlay};
pub use point::PointBuilder;
pub use polygon::PolygonBuilder;
pub use snap::{GeometrySnapper, overlay_snap_if_needed};
