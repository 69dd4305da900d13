//! Computing and checking the intersections between graph edges.

mod segment;
mod set;
mod validate;

pub use segment::SegmentIntersector;
pub use set::{EdgeSetIntersector, IndexedEdgeSetIntersector, SimpleEdgeSetIntersector};
pub use validate::check_noding;
