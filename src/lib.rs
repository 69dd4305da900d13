#![doc = "Planar overlay, relate and cascaded union over `geo` geometries"]
pub mod algorithm;
mod error;
pub mod geom;
pub mod graph;
pub mod index;
pub mod io;
pub mod noding;
pub mod overlay;
pub mod relate;
pub mod union;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use overlay::{OpCode, OverlayOp, overlay, overlay_snap_if_needed};

#[doc(inline)]
pub use relate::{IntersectionMatrix, RelateOp, relate, relate_pattern};

#[doc(inline)]
pub use union::{CascadedPolygonUnion, UnionStrategy, unary_union};

#[doc(inline)]
pub use algorithm::BoundaryNodeRule;

#[doc(inline)]
pub use geom::Dimension;
