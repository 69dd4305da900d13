mod boundary_rule;
mod intersector;
mod locate;
mod orientation;

pub use boundary_rule::BoundaryNodeRule;
pub use intersector::LineIntersector;
pub use locate::{PointLocator, is_on_line, locate_in_area, locate_in_polygon, locate_point_in_ring};
pub use orientation::{is_ccw, signed_area2};
