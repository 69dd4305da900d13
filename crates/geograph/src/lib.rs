pub mod coord;
pub mod depth;
pub mod direction;
pub mod edge;
pub mod edge_list;
pub mod error;
pub mod graph;
pub mod label;
pub mod location;
pub mod snap;
pub mod star;

pub use coord::CoordKey;
pub use depth::Depth;
pub use direction::Quadrant;
pub use edge::{Edge, EdgeIntersection, EdgeIntersectionList};
pub use edge_list::EdgeList;
pub use error::TopologyError;
pub use graph::{DirEdgeId, DirectedEdge, EdgeId, Node, NodeId, NodeMap, PlanarGraph, RingId};
pub use label::{Label, TopologyLocation};
pub use location::{Location, Position};
